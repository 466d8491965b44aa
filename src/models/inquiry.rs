use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Closed => "closed",
        }
    }

    /// Forward-only progression along new -> contacted -> closed. Skipping
    /// contacted is allowed; re-submitting the current status is accepted;
    /// moving backwards is not.
    pub fn can_transition_to(self, next: InquiryStatus) -> bool {
        use InquiryStatus::*;
        self == next || matches!((self, next), (New, Contacted) | (New, Closed) | (Contacted, Closed))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: String,
    pub car_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(default)]
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

impl Inquiry {
    pub fn new(input: InquiryCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            car_id: input.car_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            message: input.message,
            status: InquiryStatus::New,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InquiryCreate {
    #[validate(length(min = 1, message = "car_id cannot be empty"))]
    pub car_id: String,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "email cannot be empty"))]
    pub email: String,
    pub phone: String,
    #[validate(length(min = 1, message = "message cannot be empty"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryStats {
    pub total: u64,
    #[serde(rename = "new")]
    pub new_count: u64,
    pub contacted: u64,
    pub closed: u64,
}
