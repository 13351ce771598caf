//! crates/thriftlife_client/src/error.rs
//!
//! Failures surfaced to the user. Each variant belongs to one kind of action,
//! so a view can tell "not found" apart from a generic failure.

use thriftlife_core::{PortError, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required field was missing; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Tracking ID not found")]
    NotFound,

    #[error("Failed to submit donation request: {0}")]
    Submission(String),

    #[error("Failed to fetch donation details: {0}")]
    Lookup(String),

    #[error("Failed to update donation status: {0}")]
    Update(String),

    #[error("Failed to add item: {0}")]
    ItemCreation(String),

    #[error("Failed to load {what}: {reason}")]
    Load { what: &'static str, reason: String },
}

impl ClientError {
    /// Classifies a failed tracking lookup.
    pub fn lookup(e: PortError) -> Self {
        match e {
            PortError::NotFound(_) => Self::NotFound,
            other => Self::Lookup(other.to_string()),
        }
    }

    pub fn load(what: &'static str, e: PortError) -> Self {
        Self::Load {
            what,
            reason: e.to_string(),
        }
    }

    /// The short text shown in a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound => "Tracking ID not found".to_string(),
            Self::Submission(_) => "Failed to submit donation request".to_string(),
            Self::Lookup(_) => "Failed to fetch donation details".to_string(),
            Self::Update(_) => "Failed to update donation status".to_string(),
            Self::ItemCreation(_) => "Failed to add item".to_string(),
            Self::Load { what, .. } => format!("Failed to load {}", what),
        }
    }
}
