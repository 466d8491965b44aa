use async_trait::async_trait;
use mongodb::bson::{self, Document};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("document serialization error: {0}")]
    Serialization(String),
}

/// Document-level persistence seam. Predicates, sorts, and updates are BSON
/// documents; every backend evaluates the same predicate language, so the
/// in-memory implementation can stand in for MongoDB under test.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Applies a `$set` update to the first matching document. Returns the
    /// matched count (0 or 1).
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<u64, StoreError>;

    /// Returns the deleted count (0 or 1).
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    async fn distinct(
        &self,
        collection: &str,
        field: &str,
        filter: Document,
    ) -> Result<Vec<String>, StoreError>;
}

pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    bson::to_document(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StoreError> {
    bson::from_document(document).map_err(|e| StoreError::Serialization(e.to_string()))
}
