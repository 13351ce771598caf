//! services/api/src/bin/api.rs

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use thriftlife_api::{
    adapters::{InMemoryAdapter, PgAdapter},
    config::Config,
    error::ApiError,
    web::{self, rest::ApiDoc, AppState},
};
use thriftlife_core::ports::DatabaseService;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Select the Store ---
    let db: Arc<dyn DatabaseService> = match &config.database_url {
        Some(url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
            let adapter = PgAdapter::new(db_pool);
            info!("Running database migrations...");
            adapter.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(adapter)
        }
        None => {
            warn!("DATABASE_URL is not set; data will be kept in memory only");
            Arc::new(InMemoryAdapter::new())
        }
    };

    if !config.enforce_forward_status {
        warn!("Donation status updates may move backwards (ENFORCE_FORWARD_STATUS=false)");
    }

    // --- 3. Build the Shared AppState and Router ---
    let bind_address = config.bind_address;
    let app_state = AppState::new(db, config);
    let app = web::router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 4. Start the Server ---
    info!("Starting server on {}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
