pub mod admin;
pub mod cars;
pub mod contact;
pub mod inquiries;
pub mod seed;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .nest("/cars", cars::router())
        .nest("/inquiries", inquiries::router())
        .merge(contact::router())
        .merge(admin::router())
        .merge(seed::router())
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Velocità Motors API"
    }))
}
