//! crates/thriftlife_core/src/validation.rs
//!
//! Client-side field validation failures. These never reach the network.

/// A required field was missing or a value was out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields ({0} is missing)")]
    MissingField(&'static str),
    #[error("Please select at least one clothing category")]
    NoCategories,
    #[error("Estimated weight cannot be negative")]
    NegativeWeight,
    #[error("Price cannot be negative")]
    NegativePrice,
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
    #[error("Please enter a tracking ID")]
    EmptyTrackingId,
}
