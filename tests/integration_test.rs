use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use velocita_api::handlers;
use velocita_api::models::AdminCredentials;
use velocita_api::repository::MemoryStore;
use velocita_api::AppState;

async fn create_test_server() -> SocketAddr {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store, AdminCredentials::new("admin", "test-password"));

    let app = Router::new()
        .nest("/api", handlers::router())
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Create a shutdown signal that will never trigger (test will complete first)
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let shutdown = async {
        rx.await.ok();
    };

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .unwrap();
    });

    // Verify server is actually listening by trying to connect
    let mut retries = 0;
    while retries < 10 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        retries += 1;
    }

    // Prevent tx from being dropped (which would trigger shutdown)
    std::mem::forget(tx);

    addr
}

fn test_car(brand: &str, model: &str, price: f64) -> Value {
    json!({
        "brand": brand,
        "model": model,
        "year": 2022,
        "price": price,
        "mileage": 10000,
        "fuel_type": "Petrol",
        "transmission": "Automatic",
        "body_type": "Sedan",
        "color": "Black",
        "engine": "2.0L I4",
        "description": "Test listing",
        "features": ["Navigation", "Heated Seats"],
        "images": ["https://example.com/car.jpg"],
        "is_featured": false,
        "status": "available"
    })
}

async fn create_car(client: &Client, addr: SocketAddr, payload: &Value) -> Value {
    let response = client
        .post(format!("http://{}/api/cars", addr))
        .json(payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    response.json().await.unwrap()
}

async fn get_cars(client: &Client, addr: SocketAddr, query: &str) -> Vec<Value> {
    let response = client
        .get(format!("http://{}/api/cars{}", addr, query))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_root_should_return_service_identification() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .get(format!("http://{}/api", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Velocità Motors API");
}

#[tokio::test]
async fn test_create_car_should_round_trip_all_client_fields() {
    let addr = create_test_server().await;
    let client = Client::new();

    let payload = test_car("Porsche", "911 Turbo S", 189900.0);
    let created = create_car(&client, addr, &payload).await;

    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["created_at"], created["updated_at"]);

    let response = client
        .get(format!("http://{}/api/cars/{}", addr, created["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let fetched: Value = response.json().await.unwrap();

    for field in [
        "brand",
        "model",
        "year",
        "price",
        "mileage",
        "fuel_type",
        "transmission",
        "body_type",
        "color",
        "engine",
        "description",
        "features",
        "images",
        "is_featured",
        "status",
    ] {
        assert_eq!(fetched[field], payload[field], "field {} changed", field);
    }
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn test_create_car_with_missing_required_field_should_return_422() {
    let addr = create_test_server().await;
    let client = Client::new();

    let mut payload = test_car("BMW", "M4", 89500.0);
    payload.as_object_mut().unwrap().remove("brand");

    let response = client
        .post(format!("http://{}/api/cars", addr))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_create_car_with_empty_brand_should_return_422() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .post(format!("http://{}/api/cars", addr))
        .json(&test_car("", "M4", 89500.0))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_filter_cars_by_brand_should_match_case_insensitive_substring() {
    let addr = create_test_server().await;
    let client = Client::new();

    create_car(&client, addr, &test_car("BMW", "M4", 89500.0)).await;
    create_car(&client, addr, &test_car("Audi", "RS7", 115000.0)).await;

    let cars = get_cars(&client, addr, "?brand=bmw").await;
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["brand"], "BMW");

    let cars = get_cars(&client, addr, "?brand=MW").await;
    assert_eq!(cars.len(), 1);

    let cars = get_cars(&client, addr, "?brand=lancia").await;
    assert!(cars.is_empty());
}

#[tokio::test]
async fn test_filter_cars_with_min_price_only_should_apply_open_ended_range() {
    let addr = create_test_server().await;
    let client = Client::new();

    create_car(&client, addr, &test_car("Toyota", "Land Cruiser", 72000.0)).await;
    create_car(&client, addr, &test_car("Lamborghini", "Huracan", 265000.0)).await;

    let cars = get_cars(&client, addr, "?min_price=100000").await;
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["brand"], "Lamborghini");
}

#[tokio::test]
async fn test_filter_cars_with_inverted_price_range_should_return_empty_list() {
    let addr = create_test_server().await;
    let client = Client::new();

    create_car(&client, addr, &test_car("BMW", "X7", 98500.0)).await;

    let cars = get_cars(&client, addr, "?min_price=200000&max_price=100000").await;
    assert!(cars.is_empty());
}

#[tokio::test]
async fn test_filter_cars_with_empty_brand_should_return_everything() {
    let addr = create_test_server().await;
    let client = Client::new();

    create_car(&client, addr, &test_car("BMW", "M4", 89500.0)).await;
    create_car(&client, addr, &test_car("Audi", "RS7", 115000.0)).await;

    let cars = get_cars(&client, addr, "?brand=").await;
    assert_eq!(cars.len(), 2);
}

#[tokio::test]
async fn test_filter_cars_with_combined_filters() {
    let addr = create_test_server().await;
    let client = Client::new();

    let mut suv = test_car("Mercedes-Benz", "G63 AMG", 175000.0);
    suv["body_type"] = json!("SUV");
    create_car(&client, addr, &suv).await;

    let mut cheap_suv = test_car("Toyota", "Land Cruiser", 72000.0);
    cheap_suv["body_type"] = json!("SUV");
    create_car(&client, addr, &cheap_suv).await;

    create_car(&client, addr, &test_car("Audi", "RS7", 115000.0)).await;

    let cars = get_cars(&client, addr, "?body_type=SUV&max_price=100000").await;
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["brand"], "Toyota");
}

#[tokio::test]
async fn test_filter_cars_with_non_numeric_bound_should_return_400() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .get(format!("http://{}/api/cars?min_price=expensive", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_list_cars_should_return_newest_first_and_honor_limit() {
    let addr = create_test_server().await;
    let client = Client::new();

    create_car(&client, addr, &test_car("Audi", "RS7", 115000.0)).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    create_car(&client, addr, &test_car("BMW", "M4", 89500.0)).await;

    let cars = get_cars(&client, addr, "").await;
    assert_eq!(cars.len(), 2);
    assert_eq!(cars[0]["brand"], "BMW");
    assert_eq!(cars[1]["brand"], "Audi");

    let cars = get_cars(&client, addr, "?limit=1").await;
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["brand"], "BMW");
}

#[tokio::test]
async fn test_featured_cars_should_exclude_unfeatured_and_unavailable() {
    let addr = create_test_server().await;
    let client = Client::new();

    let mut featured = test_car("Porsche", "911", 189900.0);
    featured["is_featured"] = json!(true);
    create_car(&client, addr, &featured).await;

    let mut featured_sold = test_car("Ferrari", "Roma", 230000.0);
    featured_sold["is_featured"] = json!(true);
    featured_sold["status"] = json!("sold");
    create_car(&client, addr, &featured_sold).await;

    create_car(&client, addr, &test_car("Toyota", "Land Cruiser", 72000.0)).await;

    let response = client
        .get(format!("http://{}/api/cars/featured", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let cars: Vec<Value> = response.json().await.unwrap();

    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["brand"], "Porsche");
}

#[tokio::test]
async fn test_brands_should_return_distinct_values() {
    let addr = create_test_server().await;
    let client = Client::new();

    create_car(&client, addr, &test_car("BMW", "M4", 89500.0)).await;
    create_car(&client, addr, &test_car("BMW", "X7", 98500.0)).await;
    create_car(&client, addr, &test_car("Audi", "RS7", 115000.0)).await;

    let response = client
        .get(format!("http://{}/api/cars/brands", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let brands: Vec<String> = response.json().await.unwrap();

    assert_eq!(brands.len(), 2);
    assert!(brands.contains(&"BMW".to_string()));
    assert!(brands.contains(&"Audi".to_string()));
}

#[tokio::test]
async fn test_update_car_price_only_should_preserve_other_fields_and_advance_updated_at() {
    let addr = create_test_server().await;
    let client = Client::new();

    let created = create_car(&client, addr, &test_car("BMW", "M4", 89500.0)).await;
    let id = created["id"].as_str().unwrap();
    let before = created["updated_at"].as_str().unwrap().to_string();

    tokio::time::sleep(Duration::from_millis(20)).await;

    let response = client
        .put(format!("http://{}/api/cars/{}", addr, id))
        .json(&json!({ "price": 85000.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.unwrap();

    assert_eq!(updated["price"], 85000.0);
    assert_eq!(updated["brand"], "BMW");
    assert_eq!(updated["model"], "M4");
    assert_eq!(updated["features"], created["features"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(updated["updated_at"].as_str().unwrap() > before.as_str());
}

#[tokio::test]
async fn test_update_should_not_change_id_or_created_at() {
    let addr = create_test_server().await;
    let client = Client::new();

    let created = create_car(&client, addr, &test_car("BMW", "M4", 89500.0)).await;
    let id = created["id"].as_str().unwrap();

    let response = client
        .put(format!("http://{}/api/cars/{}", addr, id))
        .json(&json!({
            "id": "forged-id",
            "created_at": "1999-01-01T00:00:00Z",
            "color": "Red"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.unwrap();

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_eq!(updated["color"], "Red");
}

#[tokio::test]
async fn test_update_unknown_car_should_return_404() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .put(format!("http://{}/api/cars/no-such-car", addr))
        .json(&json!({ "price": 1000.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_get_unknown_car_should_return_404() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .get(format!("http://{}/api/cars/no-such-car", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_delete_car_should_signal_not_found_on_second_delete() {
    let addr = create_test_server().await;
    let client = Client::new();

    let created = create_car(&client, addr, &test_car("BMW", "M4", 89500.0)).await;
    let id = created["id"].as_str().unwrap();

    let response = client
        .delete(format!("http://{}/api/cars/{}", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Car deleted successfully");

    let response = client
        .delete(format!("http://{}/api/cars/{}", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_seed_should_populate_once_and_stats_should_match_fixture() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .post(format!("http://{}/api/seed", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Database seeded successfully");
    assert_eq!(body["count"], 10);

    let response = client
        .get(format!("http://{}/api/cars/stats", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let stats: Value = response.json().await.unwrap();
    assert_eq!(stats["total"], 10);
    assert_eq!(stats["available"], 10);
    assert_eq!(stats["sold"], 0);
    assert_eq!(stats["reserved"], 0);
    assert_eq!(stats["featured"], 6);

    // Second seed is a no-op reporting the current count
    let response = client
        .post(format!("http://{}/api/seed", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Database already seeded");
    assert_eq!(body["count"], 10);

    let cars = get_cars(&client, addr, "").await;
    assert_eq!(cars.len(), 10);
}

#[tokio::test]
async fn test_create_inquiry_for_unknown_car_should_return_404_and_write_nothing() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .post(format!("http://{}/api/inquiries", addr))
        .json(&json!({
            "car_id": "no-such-car",
            "name": "Jordan",
            "email": "jordan@example.com",
            "phone": "+41790000000",
            "message": "Is this still available?"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = client
        .get(format!("http://{}/api/inquiries", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let inquiries: Vec<Value> = response.json().await.unwrap();
    assert!(inquiries.is_empty());
}

async fn create_inquiry(client: &Client, addr: SocketAddr) -> Value {
    let car = create_car(client, addr, &test_car("BMW", "M4", 89500.0)).await;
    let response = client
        .post(format!("http://{}/api/inquiries", addr))
        .json(&json!({
            "car_id": car["id"],
            "name": "Jordan",
            "email": "jordan@example.com",
            "phone": "+41790000000",
            "message": "Is this still available?"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_create_inquiry_should_default_to_new_status() {
    let addr = create_test_server().await;
    let client = Client::new();

    let inquiry = create_inquiry(&client, addr).await;
    assert_eq!(inquiry["status"], "new");
    assert!(!inquiry["id"].as_str().unwrap().is_empty());

    let response = client
        .get(format!("http://{}/api/inquiries?status=new", addr))
        .send()
        .await
        .unwrap();
    let inquiries: Vec<Value> = response.json().await.unwrap();
    assert_eq!(inquiries.len(), 1);

    let response = client
        .get(format!("http://{}/api/inquiries?status=closed", addr))
        .send()
        .await
        .unwrap();
    let inquiries: Vec<Value> = response.json().await.unwrap();
    assert!(inquiries.is_empty());
}

#[tokio::test]
async fn test_inquiry_status_forward_transitions_should_succeed() {
    let addr = create_test_server().await;
    let client = Client::new();

    let inquiry = create_inquiry(&client, addr).await;
    let id = inquiry["id"].as_str().unwrap();

    for status in ["contacted", "closed"] {
        let response = client
            .put(format!("http://{}/api/inquiries/{}/status?status={}", addr, id, status))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Status updated");
    }

    let response = client
        .get(format!("http://{}/api/inquiries?status=closed", addr))
        .send()
        .await
        .unwrap();
    let inquiries: Vec<Value> = response.json().await.unwrap();
    assert_eq!(inquiries.len(), 1);
}

#[tokio::test]
async fn test_inquiry_status_backward_transition_should_return_422() {
    let addr = create_test_server().await;
    let client = Client::new();

    let inquiry = create_inquiry(&client, addr).await;
    let id = inquiry["id"].as_str().unwrap();

    let response = client
        .put(format!("http://{}/api/inquiries/{}/status?status=contacted", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .put(format!("http://{}/api/inquiries/{}/status?status=new", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_inquiry_status_with_unknown_value_should_return_400() {
    let addr = create_test_server().await;
    let client = Client::new();

    let inquiry = create_inquiry(&client, addr).await;
    let id = inquiry["id"].as_str().unwrap();

    let response = client
        .put(format!("http://{}/api/inquiries/{}/status?status=escalated", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_inquiry_status_for_unknown_inquiry_should_return_404() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .put(format!("http://{}/api/inquiries/no-such-inquiry/status?status=contacted", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_inquiry_stats_should_count_by_status() {
    let addr = create_test_server().await;
    let client = Client::new();

    let first = create_inquiry(&client, addr).await;
    create_inquiry(&client, addr).await;

    let response = client
        .put(format!(
            "http://{}/api/inquiries/{}/status?status=contacted",
            addr,
            first["id"].as_str().unwrap()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("http://{}/api/inquiries/stats", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let stats: Value = response.json().await.unwrap();
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["new"], 1);
    assert_eq!(stats["contacted"], 1);
    assert_eq!(stats["closed"], 0);
}

#[tokio::test]
async fn test_contact_message_should_round_trip() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .post(format!("http://{}/api/contact", addr))
        .json(&json!({
            "name": "Sam",
            "email": "sam@example.com",
            "message": "Do you take trade-ins?"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let created: Value = response.json().await.unwrap();
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["phone"], Value::Null);

    let response = client
        .get(format!("http://{}/api/contacts", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let messages: Vec<Value> = response.json().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["name"], "Sam");
    assert_eq!(messages[0]["message"], "Do you take trade-ins?");
}

#[tokio::test]
async fn test_admin_login_with_configured_credentials_should_succeed() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .post(format!("http://{}/api/admin/login", addr))
        .json(&json!({ "username": "admin", "password": "test-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
}

#[tokio::test]
async fn test_admin_login_with_wrong_password_should_return_401_without_detail() {
    let addr = create_test_server().await;
    let client = Client::new();

    let response = client
        .post(format!("http://{}/api/admin/login", addr))
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid credentials");
    assert!(body.get("username").is_none());
    assert!(body.get("password").is_none());
}
