use axum::{extract::State, response::Json, routing::post, Router};
use serde_json::json;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{Car, CarCreate, CarStatus};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/seed", post(seed_database))
}

/// One-time population. A no-op reporting the current count if any car
/// already exists.
async fn seed_database(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let existing = state.cars.count().await?;
    if existing > 0 {
        return Ok(Json(json!({
            "message": "Database already seeded",
            "count": existing
        })));
    }

    let samples = sample_cars();
    let count = samples.len();
    for sample in samples {
        let car = Car::new(sample);
        state.cars.insert(&car).await?;
    }

    tracing::info!("{} Seeded database with {} sample cars", API_NAME, count);
    Ok(Json(json!({
        "message": "Database seeded successfully",
        "count": count
    })))
}

fn car(
    brand: &str,
    model: &str,
    year: i32,
    price: f64,
    mileage: i32,
    fuel_type: &str,
    body_type: &str,
    color: &str,
    engine: &str,
    description: &str,
    features: &[&str],
    images: &[&str],
    is_featured: bool,
) -> CarCreate {
    CarCreate {
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage,
        fuel_type: fuel_type.to_string(),
        transmission: "Automatic".to_string(),
        body_type: body_type.to_string(),
        color: color.to_string(),
        engine: engine.to_string(),
        description: description.to_string(),
        features: features.iter().map(|s| s.to_string()).collect(),
        images: images.iter().map(|s| s.to_string()).collect(),
        is_featured,
        status: CarStatus::Available,
    }
}

pub fn sample_cars() -> Vec<CarCreate> {
    vec![
        car(
            "Porsche",
            "911 Turbo S",
            2022,
            189900.0,
            12500,
            "Petrol",
            "Sports",
            "GT Silver",
            "3.8L Twin-Turbo Flat-6",
            "Immaculate Porsche 911 Turbo S with full service history. Features Sport Chrono package, PCCB ceramic brakes, and premium leather interior.",
            &["Sport Chrono", "PCCB Brakes", "Bose Sound", "Heated Seats", "Navigation"],
            &[
                "https://images.unsplash.com/photo-1614162692292-7ac56d7f7f1e?w=800",
                "https://images.unsplash.com/photo-1503376780353-7e6692767b70?w=800",
            ],
            true,
        ),
        car(
            "Mercedes-Benz",
            "G63 AMG",
            2023,
            175000.0,
            8200,
            "Petrol",
            "SUV",
            "Obsidian Black",
            "4.0L V8 Biturbo",
            "Nearly new G63 AMG with AMG Night Package. Exceptional condition with full manufacturer warranty remaining.",
            &["AMG Night Package", "Burmester Sound", "360 Camera", "Heated/Cooled Seats", "Ambient Lighting"],
            &[
                "https://images.unsplash.com/photo-1606611013016-969c19ba27bb?w=800",
                "https://images.unsplash.com/photo-1618843479313-40f8afb4b4d8?w=800",
            ],
            true,
        ),
        car(
            "BMW",
            "M4 Competition",
            2023,
            89500.0,
            15600,
            "Petrol",
            "Coupe",
            "Isle of Man Green",
            "3.0L Twin-Turbo I6",
            "Stunning M4 Competition in rare Isle of Man Green. Carbon fiber roof, M Carbon bucket seats, and track package.",
            &["M Carbon Seats", "Carbon Roof", "M Track Package", "Harman Kardon", "Head-Up Display"],
            &[
                "https://images.unsplash.com/photo-1617531653332-bd46c24f2068?w=800",
                "https://images.unsplash.com/photo-1555215695-3004980ad54e?w=800",
            ],
            true,
        ),
        car(
            "Audi",
            "RS7 Sportback",
            2022,
            115000.0,
            22000,
            "Petrol",
            "Sedan",
            "Nardo Grey",
            "4.0L V8 TFSI",
            "Performance meets practicality. This RS7 features the Carbon Optic package and dynamic all-wheel steering.",
            &["Carbon Optic Package", "Dynamic Steering", "Bang & Olufsen", "Night Vision", "Massage Seats"],
            &[
                "https://images.unsplash.com/photo-1606664515524-ed2f786a0bd6?w=800",
                "https://images.unsplash.com/photo-1603584173870-7f23fdae1b7a?w=800",
            ],
            true,
        ),
        car(
            "Range Rover",
            "Sport SVR",
            2021,
            95000.0,
            28500,
            "Petrol",
            "SUV",
            "Santorini Black",
            "5.0L Supercharged V8",
            "The ultimate performance SUV. SVR styling with supercharged V8 power and luxurious interior.",
            &["SVR Carbon Fiber Pack", "Meridian Sound", "Panoramic Roof", "Adaptive Cruise", "Terrain Response 2"],
            &[
                "https://images.unsplash.com/photo-1606016159991-dfe4f2746ad5?w=800",
                "https://images.unsplash.com/photo-1519641471654-76ce0107ad1b?w=800",
            ],
            false,
        ),
        car(
            "Tesla",
            "Model S Plaid",
            2023,
            108000.0,
            5200,
            "Electric",
            "Sedan",
            "Pearl White",
            "Tri-Motor AWD",
            "The quickest production car ever made. Full Self-Driving capability with premium interior upgrades.",
            &["Full Self-Driving", "Yoke Steering", "Premium Audio", "Glass Roof", "Gaming Computer"],
            &[
                "https://images.unsplash.com/photo-1617788138017-80ad40651399?w=800",
                "https://images.unsplash.com/photo-1536700503339-1e4b06520771?w=800",
            ],
            true,
        ),
        car(
            "Lamborghini",
            "Huracán EVO",
            2021,
            265000.0,
            8900,
            "Petrol",
            "Sports",
            "Verde Mantis",
            "5.2L V10",
            "Breathtaking Huracán EVO in stunning Verde Mantis. Lift system, sport exhaust, and carbon ceramic brakes.",
            &["Lift System", "Carbon Ceramics", "Sport Exhaust", "Sensonum Sound", "LDVI System"],
            &[
                "https://images.unsplash.com/photo-1544636331-e26879cd4d9b?w=800",
                "https://images.unsplash.com/photo-1621135802920-133df287f89c?w=800",
            ],
            true,
        ),
        car(
            "Toyota",
            "Land Cruiser",
            2022,
            72000.0,
            18500,
            "Petrol",
            "SUV",
            "Army Green",
            "3.5L Twin-Turbo V6",
            "Legendary reliability meets modern luxury. Heritage Edition with exclusive features and premium leather.",
            &["Heritage Edition", "Multi-Terrain Select", "JBL Audio", "Panoramic View", "Crawl Control"],
            &[
                "https://images.unsplash.com/photo-1594502184342-2e12f877aa73?w=800",
                "https://images.unsplash.com/photo-1568605117036-5fe5e7bab0b7?w=800",
            ],
            false,
        ),
        car(
            "Mercedes-Benz",
            "AMG GT",
            2020,
            125000.0,
            16200,
            "Petrol",
            "Coupe",
            "Selenite Grey",
            "4.0L V8 Biturbo",
            "Pure driving excitement. AMG GT with AMG Aerodynamic Package and exclusive interior appointments.",
            &["AMG Aero Package", "Burmester High-End", "AMG Track Pace", "Nappa Leather", "Performance Exhaust"],
            &[
                "https://images.unsplash.com/photo-1618843479313-40f8afb4b4d8?w=800",
                "https://images.unsplash.com/photo-1580274455191-1c62238fa333?w=800",
            ],
            false,
        ),
        car(
            "BMW",
            "X7 M50i",
            2023,
            98500.0,
            11200,
            "Petrol",
            "SUV",
            "Carbon Black",
            "4.4L Twin-Turbo V8",
            "Ultimate luxury SUV with M Performance DNA. Executive lounge seating and sky lounge panoramic roof.",
            &["Executive Lounge", "Sky Lounge Roof", "Bowers & Wilkins", "6 Seats", "Gesture Control"],
            &[
                "https://images.unsplash.com/photo-1579091337137-3da292da7bc0?w=800",
                "https://images.unsplash.com/photo-1556189250-72ba954cfc2b?w=800",
            ],
            false,
        ),
    ]
}
