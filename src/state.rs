use std::sync::Arc;

use crate::models::AdminCredentials;
use crate::repository::{CarRepository, ContactRepository, DocumentStore, InquiryRepository};

/// Shared application state: one repository per collection plus the admin
/// credential pair. Everything is injected at construction so tests can
/// substitute an in-memory store and fixed credentials.
#[derive(Clone)]
pub struct AppState {
    pub cars: CarRepository,
    pub inquiries: InquiryRepository,
    pub contacts: ContactRepository,
    pub admin: AdminCredentials,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, admin: AdminCredentials) -> Self {
        Self {
            cars: CarRepository::new(store.clone()),
            inquiries: InquiryRepository::new(store.clone()),
            contacts: ContactRepository::new(store),
            admin,
        }
    }
}
