//! services/api/src/web/users.rs
//!
//! Donor profile endpoints. Profiles carry no credentials.

use crate::error::ApiError;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use thriftlife_core::domain::{NewUser, User};
use uuid::Uuid;

/// Register a donor profile.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "Profile created", body = User),
        (status = 400, description = "Name or email missing")
    )
)]
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    input.validate()?;
    let user = User::register(input, Utc::now());
    state.db.insert_user(&user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Fetch a donor profile.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The profile", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.db.get_user(id).await?))
}
