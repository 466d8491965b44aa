use std::sync::Arc;

use mongodb::bson::{doc, Document};

use super::query;
use super::store::{from_document, to_document, DocumentStore, StoreError};
use crate::models::{Inquiry, InquiryStats, InquiryStatus};

const COLLECTION: &str = "inquiries";
const LIST_LIMIT: i64 = 1000;

#[derive(Clone)]
pub struct InquiryRepository {
    store: Arc<dyn DocumentStore>,
}

impl InquiryRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn insert(&self, inquiry: &Inquiry) -> Result<(), StoreError> {
        self.store
            .insert_one(COLLECTION, to_document(inquiry)?)
            .await
    }

    pub async fn find(&self, status: Option<InquiryStatus>) -> Result<Vec<Inquiry>, StoreError> {
        let documents = self
            .store
            .find_many(
                COLLECTION,
                query::inquiry_query(status),
                Some(doc! { "created_at": -1 }),
                Some(LIST_LIMIT),
            )
            .await?;
        documents.into_iter().map(from_document).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Inquiry>, StoreError> {
        match self.store.find_one(COLLECTION, doc! { "id": id }).await? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: InquiryStatus,
    ) -> Result<u64, StoreError> {
        self.store
            .update_one(
                COLLECTION,
                doc! { "id": id },
                doc! { "$set": { "status": status.as_str() } },
            )
            .await
    }

    pub async fn stats(&self) -> Result<InquiryStats, StoreError> {
        Ok(InquiryStats {
            total: self.store.count(COLLECTION, Document::new()).await?,
            new_count: self
                .store
                .count(COLLECTION, doc! { "status": InquiryStatus::New.as_str() })
                .await?,
            contacted: self
                .store
                .count(
                    COLLECTION,
                    doc! { "status": InquiryStatus::Contacted.as_str() },
                )
                .await?,
            closed: self
                .store
                .count(COLLECTION, doc! { "status": InquiryStatus::Closed.as_str() })
                .await?,
        })
    }
}
