//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, and how each
//! variant is reported to HTTP clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thriftlife_core::{PortError, ValidationError};
use tracing::error;

use crate::config::ConfigError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a failure to apply pending schema migrations.
    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Request payload failed field validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request conflicts with the resource's current state.
    #[error("{0}")]
    Conflict(String),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Port(PortError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::Port(PortError::Rejected(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            match &self {
                Self::Port(PortError::NotFound(what)) => what.clone(),
                other => other.to_string(),
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_http_statuses() {
        assert_eq!(
            ApiError::from(ValidationError::NoCategories).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(PortError::NotFound("Donation not found".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("backwards".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(PortError::Unexpected("pool closed".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
