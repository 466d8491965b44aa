use axum::{extract::State, response::Json, routing::post, Router};
use serde_json::json;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::AdminLogin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<AdminLogin>,
) -> Result<Json<serde_json::Value>, AppError> {
    if state.admin.verify(&credentials) {
        tracing::info!("{} Admin login succeeded", API_NAME);
        Ok(Json(json!({
            "success": true,
            "message": "Login successful"
        })))
    } else {
        // Same response whichever field mismatched.
        Err(AppError::Unauthorized("Invalid credentials".to_string()))
    }
}
