use std::sync::Arc;

use mongodb::bson::{doc, Document};

use super::query;
use super::store::{from_document, to_document, DocumentStore, StoreError};
use crate::models::{Car, CarFilter, CarStats, CarStatus, CarUpdate};

const COLLECTION: &str = "cars";
const FEATURED_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct CarRepository {
    store: Arc<dyn DocumentStore>,
}

impl CarRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn insert(&self, car: &Car) -> Result<(), StoreError> {
        self.store.insert_one(COLLECTION, to_document(car)?).await
    }

    pub async fn find(&self, filter: &CarFilter) -> Result<Vec<Car>, StoreError> {
        let documents = self
            .store
            .find_many(
                COLLECTION,
                query::car_query(filter),
                Some(doc! { "created_at": -1 }),
                Some(filter.limit),
            )
            .await?;
        documents.into_iter().map(from_document).collect()
    }

    pub async fn find_featured(&self) -> Result<Vec<Car>, StoreError> {
        let filter = doc! { "is_featured": true, "status": CarStatus::Available.as_str() };
        let documents = self
            .store
            .find_many(
                COLLECTION,
                filter,
                Some(doc! { "created_at": -1 }),
                Some(FEATURED_LIMIT),
            )
            .await?;
        documents.into_iter().map(from_document).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Car>, StoreError> {
        match self.store.find_one(COLLECTION, doc! { "id": id }).await? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    pub async fn update(&self, id: &str, update: &CarUpdate) -> Result<u64, StoreError> {
        let fields = update
            .set_document()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store
            .update_one(COLLECTION, doc! { "id": id }, doc! { "$set": fields })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        self.store.delete_one(COLLECTION, doc! { "id": id }).await
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.store.count(COLLECTION, Document::new()).await
    }

    pub async fn brands(&self) -> Result<Vec<String>, StoreError> {
        self.store.distinct(COLLECTION, "brand", Document::new()).await
    }

    /// Independent counts, recomputed from scratch on every call.
    pub async fn stats(&self) -> Result<CarStats, StoreError> {
        Ok(CarStats {
            total: self.store.count(COLLECTION, Document::new()).await?,
            available: self
                .store
                .count(COLLECTION, doc! { "status": CarStatus::Available.as_str() })
                .await?,
            sold: self
                .store
                .count(COLLECTION, doc! { "status": CarStatus::Sold.as_str() })
                .await?,
            reserved: self
                .store
                .count(COLLECTION, doc! { "status": CarStatus::Reserved.as_str() })
                .await?,
            featured: self
                .store
                .count(COLLECTION, doc! { "is_featured": true })
                .await?,
        })
    }
}
