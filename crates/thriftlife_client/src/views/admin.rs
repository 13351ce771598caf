//! crates/thriftlife_client/src/views/admin.rs
//!
//! Staff console: donation status updates and inventory.

use std::collections::HashSet;
use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thriftlife_core::domain::{
    ClothingCategory, ClothingCondition, Donation, DonationStatus, NewThriftItem, Size, ThriftItem,
};
use thriftlife_core::ports::ThriftBackend;
use thriftlife_core::ValidationError;
use tracing::info;
use uuid::Uuid;

use super::{Notice, Notices, View};
use crate::error::ClientError;

/// The "add item" form as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub category: Option<ClothingCategory>,
    pub size: Option<Size>,
    pub condition: Option<ClothingCondition>,
    pub price: String,
    pub images: Vec<String>,
}

impl ItemDraft {
    pub fn to_request(&self) -> Result<NewThriftItem, ValidationError> {
        let price = self.price.trim();
        if price.is_empty() {
            return Err(ValidationError::MissingField("price"));
        }
        let request = NewThriftItem {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.ok_or(ValidationError::MissingField("category"))?,
            size: self.size.ok_or(ValidationError::MissingField("size"))?,
            condition: self
                .condition
                .ok_or(ValidationError::MissingField("condition"))?,
            price: Decimal::from_str(price).map_err(|_| ValidationError::InvalidNumber("price"))?,
            original_donation_id: None,
            images: self.images.clone(),
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug)]
pub enum AdminMsg {
    Load,
    Loaded(Result<(Vec<Donation>, Vec<ThriftItem>), ClientError>),
    UpdateStatus {
        donation_id: Uuid,
        status: DonationStatus,
        assigned_agent: Option<String>,
    },
    StatusUpdated {
        donation_id: Uuid,
        outcome: Result<Donation, ClientError>,
    },
    AddItem,
    ItemAdded(Result<ThriftItem, ClientError>),
}

#[derive(Debug)]
pub enum AdminEffect {
    LoadAll,
    UpdateStatus {
        donation_id: Uuid,
        status: DonationStatus,
        assigned_agent: Option<String>,
    },
    CreateItem(NewThriftItem),
}

#[derive(Debug, Default)]
pub struct AdminView {
    donations: Vec<Donation>,
    items: Vec<ThriftItem>,
    loading: bool,
    updating: HashSet<Uuid>,
    adding_item: bool,
    pub draft: ItemDraft,
    pub notices: Notices,
}

impl AdminView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn donations(&self) -> &[Donation] {
        &self.donations
    }

    pub fn items(&self) -> &[ThriftItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The status control of this donation is disabled while true.
    pub fn is_updating(&self, donation_id: Uuid) -> bool {
        self.updating.contains(&donation_id)
    }

    pub fn is_adding_item(&self) -> bool {
        self.adding_item
    }

    pub fn scheduled_count(&self) -> usize {
        self.count_in(DonationStatus::Scheduled)
    }

    /// Completed donations as a whole percentage of all donations.
    pub fn completion_rate_percent(&self) -> u32 {
        if self.donations.is_empty() {
            return 0;
        }
        let completed = self.count_in(DonationStatus::Completed) as f64;
        (completed / self.donations.len() as f64 * 100.0).round() as u32
    }

    pub fn available_item_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_available).count()
    }

    fn count_in(&self, status: DonationStatus) -> usize {
        self.donations.iter().filter(|d| d.status == status).count()
    }

    fn merge(&mut self, updated: Donation) {
        if let Some(local) = self.donations.iter_mut().find(|d| d.id == updated.id) {
            *local = updated;
        }
    }
}

#[async_trait]
impl View for AdminView {
    type Msg = AdminMsg;
    type Effect = AdminEffect;

    fn update(&mut self, msg: AdminMsg) -> Option<AdminEffect> {
        match msg {
            AdminMsg::Load if self.loading => None,
            AdminMsg::Load => {
                self.loading = true;
                Some(AdminEffect::LoadAll)
            }
            AdminMsg::Loaded(outcome) => {
                self.loading = false;
                match outcome {
                    Ok((donations, items)) => {
                        self.donations = donations;
                        self.items = items;
                    }
                    Err(e) => self.notices.fail(&e),
                }
                None
            }
            AdminMsg::UpdateStatus { donation_id, .. } if self.is_updating(donation_id) => None,
            AdminMsg::UpdateStatus {
                donation_id,
                status,
                assigned_agent,
            } => {
                self.updating.insert(donation_id);
                Some(AdminEffect::UpdateStatus {
                    donation_id,
                    status,
                    assigned_agent: assigned_agent.filter(|a| !a.trim().is_empty()),
                })
            }
            AdminMsg::StatusUpdated {
                donation_id,
                outcome,
            } => {
                self.updating.remove(&donation_id);
                match outcome {
                    Ok(updated) => {
                        info!("Donation {} moved to {}", updated.tracking_id, updated.status);
                        self.merge(updated);
                        self.notices
                            .push(Notice::success("Donation status updated successfully"));
                    }
                    Err(e) => self.notices.fail(&e),
                }
                None
            }
            AdminMsg::AddItem if self.adding_item => None,
            AdminMsg::AddItem => match self.draft.to_request() {
                Ok(request) => {
                    self.adding_item = true;
                    Some(AdminEffect::CreateItem(request))
                }
                Err(e) => {
                    self.notices.fail(&ClientError::from(e));
                    None
                }
            },
            AdminMsg::ItemAdded(outcome) => {
                self.adding_item = false;
                match outcome {
                    Ok(item) => {
                        self.items.push(item);
                        self.draft = ItemDraft::default();
                        self.notices
                            .push(Notice::success("Item added to thrift store successfully"));
                    }
                    Err(e) => self.notices.fail(&e),
                }
                None
            }
        }
    }

    async fn run(backend: &dyn ThriftBackend, effect: AdminEffect) -> AdminMsg {
        match effect {
            AdminEffect::LoadAll => {
                let loaded = futures::try_join!(backend.list_donations(), backend.list_thrift_items())
                    .map_err(|e| ClientError::load("admin data", e));
                AdminMsg::Loaded(loaded)
            }
            AdminEffect::UpdateStatus {
                donation_id,
                status,
                assigned_agent,
            } => {
                let outcome = backend
                    .update_donation_status(donation_id, status, assigned_agent.as_deref())
                    .await
                    .map_err(|e| ClientError::Update(e.to_string()));
                AdminMsg::StatusUpdated {
                    donation_id,
                    outcome,
                }
            }
            AdminEffect::CreateItem(request) => AdminMsg::ItemAdded(
                backend
                    .create_thrift_item(&request)
                    .await
                    .map_err(|e| ClientError::ItemCreation(e.to_string())),
            ),
        }
    }
}
