//! crates/thriftlife_core/src/ports.rs
//!
//! Defines the service contracts (traits) at the edges of the core logic.
//! `DatabaseService` is implemented by the backend's storage adapters;
//! `ThriftBackend` is the browsing client's view of the REST API.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Donation, DonationStatus, ImpactStats, NewDonation, NewThriftItem, ThriftItem, User,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Donations ---
    async fn insert_donation(&self, donation: &Donation) -> PortResult<()>;

    /// All donations, newest first.
    async fn list_donations(&self) -> PortResult<Vec<Donation>>;

    async fn get_donation_by_tracking_id(&self, tracking_id: &str) -> PortResult<Donation>;

    async fn get_donation(&self, id: Uuid) -> PortResult<Donation>;

    /// Persists the mutable lifecycle fields of an existing donation.
    ///
    /// With `forward_only`, the stored status is re-checked at write time and a
    /// backward move fails with `PortError::Rejected`.
    async fn save_donation_status(&self, donation: &Donation, forward_only: bool)
        -> PortResult<()>;

    // --- Thrift Items ---
    async fn insert_thrift_item(&self, item: &ThriftItem) -> PortResult<()>;

    /// Items in listing order.
    async fn list_thrift_items(&self) -> PortResult<Vec<ThriftItem>>;

    async fn get_thrift_item(&self, id: Uuid) -> PortResult<ThriftItem>;

    // --- Users ---
    async fn insert_user(&self, user: &User) -> PortResult<()>;

    async fn get_user(&self, id: Uuid) -> PortResult<User>;
}

#[async_trait]
pub trait ThriftBackend: Send + Sync {
    /// Loads the sample data set into an empty backend; a no-op otherwise.
    async fn seed_sample_data(&self) -> PortResult<()>;

    async fn create_donation(&self, donation: &NewDonation) -> PortResult<Donation>;

    async fn get_donation(&self, tracking_id: &str) -> PortResult<Donation>;

    async fn list_donations(&self) -> PortResult<Vec<Donation>>;

    async fn update_donation_status(
        &self,
        donation_id: Uuid,
        status: DonationStatus,
        assigned_agent: Option<&str>,
    ) -> PortResult<Donation>;

    async fn list_thrift_items(&self) -> PortResult<Vec<ThriftItem>>;

    async fn create_thrift_item(&self, item: &NewThriftItem) -> PortResult<ThriftItem>;

    async fn impact_stats(&self) -> PortResult<ImpactStats>;
}
