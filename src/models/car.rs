use chrono::{DateTime, Utc};
use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Listing status. Closed set: unknown values are rejected at the edge
/// instead of being written through as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    #[default]
    Available,
    Sold,
    Reserved,
}

impl CarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Available => "available",
            CarStatus::Sold => "sold",
            CarStatus::Reserved => "reserved",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub body_type: String,
    pub color: String,
    pub engine: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub status: CarStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    pub fn new(input: CarCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            brand: input.brand,
            model: input.model,
            year: input.year,
            price: input.price,
            mileage: input.mileage,
            fuel_type: input.fuel_type,
            transmission: input.transmission,
            body_type: input.body_type,
            color: input.color,
            engine: input.engine,
            description: input.description,
            features: input.features,
            images: input.images,
            is_featured: input.is_featured,
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CarCreate {
    #[validate(length(min = 1, message = "brand cannot be empty"))]
    pub brand: String,
    #[validate(length(min = 1, message = "model cannot be empty"))]
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    #[validate(length(min = 1, message = "fuel_type cannot be empty"))]
    pub fuel_type: String,
    #[validate(length(min = 1, message = "transmission cannot be empty"))]
    pub transmission: String,
    #[validate(length(min = 1, message = "body_type cannot be empty"))]
    pub body_type: String,
    pub color: String,
    pub engine: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub status: CarStatus,
}

/// Partial update payload. Absent fields are left untouched; the identity
/// and creation timestamp are not representable here at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CarStatus>,
}

impl CarUpdate {
    /// Fields to merge into the stored document, with `updated_at` always
    /// refreshed to the current time.
    pub fn set_document(&self) -> Result<Document, bson::ser::Error> {
        let mut fields = bson::to_document(self)?;
        fields.insert("updated_at", bson::to_bson(&Utc::now())?);
        Ok(fields)
    }
}

/// Optional car-search query parameters. Every field is independently
/// combinable; `limit` caps the result count and is not part of the
/// predicate.
#[derive(Debug, Clone, Deserialize)]
pub struct CarFilter {
    pub brand: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub min_mileage: Option<i32>,
    pub max_mileage: Option<i32>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for CarFilter {
    fn default() -> Self {
        Self {
            brand: None,
            body_type: None,
            fuel_type: None,
            transmission: None,
            status: None,
            is_featured: None,
            min_price: None,
            max_price: None,
            min_year: None,
            max_year: None,
            min_mileage: None,
            max_mileage: None,
            limit: default_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarStats {
    pub total: u64,
    pub available: u64,
    pub sold: u64,
    pub reserved: u64,
    pub featured: u64,
}
