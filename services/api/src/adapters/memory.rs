//! services/api/src/adapters/memory.rs
//!
//! An in-process implementation of the `DatabaseService` port. Used when no
//! `DATABASE_URL` is configured, and by the route tests.

use async_trait::async_trait;
use std::collections::HashMap;
use thriftlife_core::domain::{Donation, ThriftItem, User};
use thriftlife_core::ports::{DatabaseService, PortError, PortResult};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    donations: Vec<Donation>,
    thrift_items: Vec<ThriftItem>,
    users: HashMap<Uuid, User>,
}

/// A store that lives as long as the process.
#[derive(Default)]
pub struct InMemoryAdapter {
    tables: RwLock<Tables>,
}

impl InMemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatabaseService for InMemoryAdapter {
    async fn insert_donation(&self, donation: &Donation) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .donations
            .iter()
            .any(|d| d.tracking_id == donation.tracking_id)
        {
            return Err(PortError::Rejected(format!(
                "Tracking ID {} already issued",
                donation.tracking_id
            )));
        }
        tables.donations.push(donation.clone());
        Ok(())
    }

    async fn list_donations(&self) -> PortResult<Vec<Donation>> {
        let tables = self.tables.read().await;
        let mut donations = tables.donations.clone();
        donations.reverse();
        donations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(donations)
    }

    async fn get_donation_by_tracking_id(&self, tracking_id: &str) -> PortResult<Donation> {
        let tables = self.tables.read().await;
        tables
            .donations
            .iter()
            .find(|d| d.tracking_id.as_str() == tracking_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("Donation not found".to_string()))
    }

    async fn get_donation(&self, id: Uuid) -> PortResult<Donation> {
        let tables = self.tables.read().await;
        tables
            .donations
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("Donation not found".to_string()))
    }

    async fn save_donation_status(
        &self,
        donation: &Donation,
        forward_only: bool,
    ) -> PortResult<()> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .donations
            .iter_mut()
            .find(|d| d.id == donation.id)
            .ok_or_else(|| PortError::NotFound("Donation not found".to_string()))?;
        if forward_only && !stored.status.can_transition_to(donation.status) {
            return Err(PortError::Rejected(format!(
                "Donation is already {}",
                stored.status
            )));
        }
        stored.status = donation.status;
        stored.assigned_agent = donation.assigned_agent.clone();
        stored.processed_at = donation.processed_at;
        stored.points_earned = donation.points_earned;
        Ok(())
    }

    async fn insert_thrift_item(&self, item: &ThriftItem) -> PortResult<()> {
        self.tables.write().await.thrift_items.push(item.clone());
        Ok(())
    }

    async fn list_thrift_items(&self) -> PortResult<Vec<ThriftItem>> {
        Ok(self.tables.read().await.thrift_items.clone())
    }

    async fn get_thrift_item(&self, id: Uuid) -> PortResult<ThriftItem> {
        let tables = self.tables.read().await;
        tables
            .thrift_items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("Item not found".to_string()))
    }

    async fn insert_user(&self, user: &User) -> PortResult<()> {
        self.tables.write().await.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> PortResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("User not found".to_string()))
    }
}
