//! services/api/src/web/rest.rs
//!
//! Service-level handlers (greeting, health, impact statistics, sample data) and
//! the master definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::seed;
use crate::web::{donations, state::AppState, thrift_items, users};
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use thriftlife_core::domain::{
    ClothingCategory, ClothingCondition, Donation, DonationStatus, ImpactStats, NewDonation,
    NewThriftItem, NewUser, Size, ThriftItem, TrackingId, User,
};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        root_handler,
        health_handler,
        impact_stats_handler,
        seed_handler,
        donations::create_donation_handler,
        donations::list_donations_handler,
        donations::get_donation_handler,
        donations::update_status_handler,
        thrift_items::list_items_handler,
        thrift_items::create_item_handler,
        thrift_items::get_item_handler,
        users::create_user_handler,
        users::get_user_handler,
    ),
    components(
        schemas(
            Message, HealthResponse, ImpactStats, Donation, NewDonation, DonationStatus,
            TrackingId, ThriftItem, NewThriftItem, ClothingCategory, ClothingCondition, Size,
            User, NewUser
        )
    ),
    tags(
        (name = "ThriftLife API", description = "Clothing donation pickups, thrift resale and impact statistics.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// A plain informational message.
#[derive(Serialize, ToSchema)]
pub struct Message {
    message: String,
}

impl Message {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Greeting.
#[utoipa::path(get, path = "/api/", responses((status = 200, body = Message)))]
pub async fn root_handler() -> Json<Message> {
    Message::new("Thrift Clothing API - Give Clothes a Second Life!")
}

/// Liveness probe.
#[utoipa::path(get, path = "/api/health", responses((status = 200, body = HealthResponse)))]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Aggregate environmental impact across all donations and items.
#[utoipa::path(
    get,
    path = "/api/impact-stats",
    responses((status = 200, description = "Current totals", body = ImpactStats))
)]
pub async fn impact_stats_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ImpactStats>, ApiError> {
    let donations = state.db.list_donations().await?;
    let items = state.db.list_thrift_items().await?;
    Ok(Json(ImpactStats::aggregate(&donations, &items)))
}

/// Replace all stored data with the sample data set.
#[utoipa::path(
    post,
    path = "/api/seed-mock-data",
    responses((status = 200, description = "Sample data loaded, or already present", body = Message))
)]
pub async fn seed_handler(State(state): State<Arc<AppState>>) -> Result<Json<Message>, ApiError> {
    if seed::seed_sample_data(state.db.as_ref()).await? {
        Ok(Message::new("Mock data seeded successfully"))
    } else {
        Ok(Message::new("Mock data already present"))
    }
}
