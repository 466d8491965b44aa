use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use validator::Validate;

use crate::error::AppError;
use crate::models::{ContactMessage, ContactMessageCreate};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(create_contact))
        .route("/contacts", get(list_contacts))
}

async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactMessageCreate>,
) -> Result<Json<ContactMessage>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = ContactMessage::new(payload);
    state.contacts.insert(&message).await?;
    Ok(Json(message))
}

async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<ContactMessage>>, AppError> {
    let messages = state.contacts.find_all().await?;
    Ok(Json(messages))
}
