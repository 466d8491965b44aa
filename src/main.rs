use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use velocita_api::config::Config;
use velocita_api::constants::API_NAME;
use velocita_api::handlers;
use velocita_api::models::AdminCredentials;
use velocita_api::repository::MongoStore;
use velocita_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting dealership API server on port {}", API_NAME, config.server_port);

    // Connect to the document store
    let store = MongoStore::connect(&config.mongo_url, &config.db_name)
        .await
        .context("Failed to connect to MongoDB")?;

    tracing::info!("{} Connected to database '{}'", API_NAME, config.db_name);

    let admin = AdminCredentials::new(&config.admin_username, &config.admin_password);
    let state = AppState::new(Arc::new(store), admin);

    // Build application router
    let app = Router::new()
        .nest("/api", handlers::router())
        .layer(config.cors_layer())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
