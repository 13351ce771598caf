//! services/api/src/web/donations.rs
//!
//! Handlers for scheduling, looking up and progressing donations.

use crate::error::ApiError;
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use thriftlife_core::domain::{Donation, DonationStatus, NewDonation};
use thriftlife_core::ports::PortError;
use tracing::{info, warn};
use utoipa::IntoParams;
use uuid::Uuid;

// Tracking ids are random; a handful of attempts is plenty to dodge a collision.
const TRACKING_ID_ATTEMPTS: usize = 3;

/// Query parameters of the status update endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusUpdateQuery {
    /// The status to move the donation to.
    pub new_status: DonationStatus,
    /// Collection agent to assign, if any.
    pub assigned_agent: Option<String>,
}

/// Schedule a clothing pickup.
#[utoipa::path(
    post,
    path = "/api/donations",
    request_body = NewDonation,
    responses(
        (status = 201, description = "Donation scheduled", body = Donation),
        (status = 400, description = "A required field is missing"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_donation_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewDonation>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = input.validate() {
        warn!("Rejected donation request: {}", e);
        return Err(e.into());
    }

    let mut attempt = 0;
    loop {
        attempt += 1;
        let donation = Donation::schedule(input.clone(), Utc::now());
        match state.db.insert_donation(&donation).await {
            Ok(()) => {
                info!(
                    "Scheduled donation {} for {}",
                    donation.tracking_id, donation.pickup_date
                );
                return Ok((StatusCode::CREATED, Json(donation)));
            }
            Err(PortError::Rejected(reason)) if attempt < TRACKING_ID_ATTEMPTS => {
                warn!("Retrying donation insert: {}", reason);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// List every donation, newest first.
#[utoipa::path(
    get,
    path = "/api/donations",
    responses(
        (status = 200, description = "All donations", body = [Donation])
    )
)]
pub async fn list_donations_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Donation>>, ApiError> {
    Ok(Json(state.db.list_donations().await?))
}

/// Look a donation up by its public tracking identifier.
#[utoipa::path(
    get,
    path = "/api/donations/{id}",
    params(("id" = String, Path, description = "Tracking identifier, e.g. DN12345678")),
    responses(
        (status = 200, description = "The donation", body = Donation),
        (status = 404, description = "Donation not found")
    )
)]
pub async fn get_donation_handler(
    State(state): State<Arc<AppState>>,
    Path(tracking_id): Path<String>,
) -> Result<Json<Donation>, ApiError> {
    Ok(Json(
        state.db.get_donation_by_tracking_id(tracking_id.trim()).await?,
    ))
}

/// Move a donation along its lifecycle (admin).
#[utoipa::path(
    put,
    path = "/api/donations/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Internal donation id"),
        StatusUpdateQuery
    ),
    responses(
        (status = 200, description = "Updated donation", body = Donation),
        (status = 404, description = "Donation not found"),
        (status = 409, description = "The update would move the donation backwards")
    )
)]
pub async fn update_status_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<StatusUpdateQuery>,
) -> Result<Json<Donation>, ApiError> {
    let mut donation = state.db.get_donation(id).await?;

    if state.config.enforce_forward_status && !donation.status.can_transition_to(query.new_status)
    {
        warn!(
            "Refused to move donation {} from {} back to {}",
            donation.tracking_id, donation.status, query.new_status
        );
        return Err(ApiError::Conflict(format!(
            "Cannot move a donation from {} back to {}",
            donation.status, query.new_status
        )));
    }

    donation.apply_status(query.new_status, query.assigned_agent, Utc::now());
    state
        .db
        .save_donation_status(&donation, state.config.enforce_forward_status)
        .await
        .map_err(|e| match e {
            PortError::Rejected(reason) => {
                warn!(
                    "Concurrent update overtook donation {}: {}",
                    donation.tracking_id, reason
                );
                ApiError::Conflict(format!(
                    "Cannot move a donation back to {}: {}",
                    query.new_status, reason
                ))
            }
            other => other.into(),
        })?;
    info!(
        "Donation {} is now {}",
        donation.tracking_id, donation.status
    );
    Ok(Json(donation))
}
