use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Inquiry, InquiryCreate, InquiryStats, InquiryStatus};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inquiries).post(create_inquiry))
        .route("/stats", get(inquiry_stats))
        .route("/:id/status", put(update_inquiry_status))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<InquiryStatus>,
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: InquiryStatus,
}

async fn create_inquiry(
    State(state): State<AppState>,
    Json(payload): Json<InquiryCreate>,
) -> Result<Json<Inquiry>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // The referenced car must exist before anything is written.
    state
        .cars
        .find_by_id(&payload.car_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    let inquiry = Inquiry::new(payload);
    state.inquiries.insert(&inquiry).await?;

    tracing::info!("{} Created inquiry {} for car {}", API_NAME, inquiry.id, inquiry.car_id);
    Ok(Json(inquiry))
}

async fn list_inquiries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Inquiry>>, AppError> {
    let inquiries = state.inquiries.find(query.status).await?;
    Ok(Json(inquiries))
}

async fn inquiry_stats(State(state): State<AppState>) -> Result<Json<InquiryStats>, AppError> {
    let stats = state.inquiries.stats().await?;
    Ok(Json(stats))
}

async fn update_inquiry_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let inquiry = state
        .inquiries
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))?;

    if !inquiry.status.can_transition_to(query.status) {
        return Err(AppError::Validation(format!(
            "cannot move inquiry status from {} to {}",
            inquiry.status.as_str(),
            query.status.as_str()
        )));
    }

    let matched = state.inquiries.update_status(&id, query.status).await?;
    if matched == 0 {
        return Err(AppError::NotFound("Inquiry not found".to_string()));
    }

    Ok(Json(json!({ "message": "Status updated" })))
}
