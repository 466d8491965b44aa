use mongodb::bson::{doc, Bson, Document};

use crate::models::{CarFilter, InquiryStatus};

/// Builds the car-search predicate: the logical AND of every supplied
/// parameter. A parameter that was not supplied contributes no key at all,
/// and a numeric pair with neither bound present emits no range document
/// for its field. Empty strings count as not supplied. No cross-field
/// validation happens here; an inverted range passes through and simply
/// matches nothing.
pub fn car_query(filter: &CarFilter) -> Document {
    let mut query = Document::new();

    if let Some(brand) = supplied(&filter.brand) {
        query.insert("brand", doc! { "$regex": brand, "$options": "i" });
    }
    if let Some(body_type) = supplied(&filter.body_type) {
        query.insert("body_type", body_type);
    }
    if let Some(fuel_type) = supplied(&filter.fuel_type) {
        query.insert("fuel_type", fuel_type);
    }
    if let Some(transmission) = supplied(&filter.transmission) {
        query.insert("transmission", transmission);
    }
    if let Some(status) = supplied(&filter.status) {
        query.insert("status", status);
    }
    if let Some(is_featured) = filter.is_featured {
        query.insert("is_featured", is_featured);
    }

    if let Some(bounds) = range(filter.min_price.map(Bson::from), filter.max_price.map(Bson::from)) {
        query.insert("price", bounds);
    }
    if let Some(bounds) = range(filter.min_year.map(Bson::from), filter.max_year.map(Bson::from)) {
        query.insert("year", bounds);
    }
    if let Some(bounds) = range(
        filter.min_mileage.map(Bson::from),
        filter.max_mileage.map(Bson::from),
    ) {
        query.insert("mileage", bounds);
    }

    query
}

pub fn inquiry_query(status: Option<InquiryStatus>) -> Document {
    let mut query = Document::new();
    if let Some(status) = status {
        query.insert("status", status.as_str());
    }
    query
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn range(min: Option<Bson>, max: Option<Bson>) -> Option<Document> {
    let mut bounds = Document::new();
    if let Some(min) = min {
        bounds.insert("$gte", min);
    }
    if let Some(max) = max {
        bounds.insert("$lte", max);
    }
    // A range with no bounds must not appear in the predicate at all.
    if bounds.is_empty() {
        None
    } else {
        Some(bounds)
    }
}
