use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use validator::Validate;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Car, CarCreate, CarFilter, CarStats, CarUpdate};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/featured", get(featured_cars))
        .route("/brands", get(list_brands))
        .route("/stats", get(car_stats))
        .route("/:id", get(get_car).put(update_car).delete(delete_car))
}

async fn create_car(
    State(state): State<AppState>,
    Json(payload): Json<CarCreate>,
) -> Result<Json<Car>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let car = Car::new(payload);
    state.cars.insert(&car).await?;

    tracing::info!("{} Created car {} {} ({})", API_NAME, car.brand, car.model, car.id);
    Ok(Json(car))
}

async fn list_cars(
    State(state): State<AppState>,
    Query(filter): Query<CarFilter>,
) -> Result<Json<Vec<Car>>, AppError> {
    let cars = state.cars.find(&filter).await?;
    Ok(Json(cars))
}

async fn featured_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>, AppError> {
    let cars = state.cars.find_featured().await?;
    Ok(Json(cars))
}

async fn list_brands(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let brands = state.cars.brands().await?;
    Ok(Json(brands))
}

async fn car_stats(State(state): State<AppState>) -> Result<Json<CarStats>, AppError> {
    let stats = state.cars.stats().await?;
    Ok(Json(stats))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Car>, AppError> {
    let car = state
        .cars
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
    Ok(Json(car))
}

async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CarUpdate>,
) -> Result<Json<Car>, AppError> {
    let matched = state.cars.update(&id, &payload).await?;
    if matched == 0 {
        return Err(AppError::NotFound("Car not found".to_string()));
    }

    let updated = state
        .cars
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
    Ok(Json(updated))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = state.cars.delete(&id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Car not found".to_string()));
    }

    tracing::info!("{} Deleted car {}", API_NAME, id);
    Ok(Json(json!({ "message": "Car deleted successfully" })))
}
