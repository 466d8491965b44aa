use std::sync::Arc;

use mongodb::bson::{doc, Document};

use super::store::{from_document, to_document, DocumentStore, StoreError};
use crate::models::ContactMessage;

const COLLECTION: &str = "contacts";
const LIST_LIMIT: i64 = 1000;

#[derive(Clone)]
pub struct ContactRepository {
    store: Arc<dyn DocumentStore>,
}

impl ContactRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn insert(&self, message: &ContactMessage) -> Result<(), StoreError> {
        self.store
            .insert_one(COLLECTION, to_document(message)?)
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<ContactMessage>, StoreError> {
        let documents = self
            .store
            .find_many(
                COLLECTION,
                Document::new(),
                Some(doc! { "created_at": -1 }),
                Some(LIST_LIMIT),
            )
            .await?;
        documents.into_iter().map(from_document).collect()
    }
}
