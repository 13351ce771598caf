pub mod donations;
pub mod rest;
pub mod state;
pub mod thrift_items;
pub mod users;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use state::AppState;

/// Builds the `/api` router with CORS and request tracing applied.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.clone())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api", get(rest::root_handler))
        .route("/api/", get(rest::root_handler))
        .route("/api/health", get(rest::health_handler))
        .route("/api/impact-stats", get(rest::impact_stats_handler))
        .route("/api/seed-mock-data", post(rest::seed_handler))
        .route(
            "/api/donations",
            get(donations::list_donations_handler).post(donations::create_donation_handler),
        )
        .route("/api/donations/{id}", get(donations::get_donation_handler))
        .route(
            "/api/donations/{id}/status",
            put(donations::update_status_handler),
        )
        .route(
            "/api/thrift-items",
            get(thrift_items::list_items_handler).post(thrift_items::create_item_handler),
        )
        .route("/api/thrift-items/{id}", get(thrift_items::get_item_handler))
        .route("/api/users", post(users::create_user_handler))
        .route("/api/users/{id}", get(users::get_user_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
