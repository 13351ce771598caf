//! An in-process `ThriftBackend` for view model tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal_macros::dec;
use thriftlife_core::domain::{
    ClothingCategory, ClothingCondition, Donation, DonationStatus, ImpactStats, NewDonation,
    NewThriftItem, Size, ThriftItem,
};
use thriftlife_core::ports::{PortError, PortResult, ThriftBackend};
use uuid::Uuid;

#[derive(Default)]
pub struct FakeBackend {
    donations: Mutex<Vec<Donation>>,
    items: Mutex<Vec<ThriftItem>>,
    offline: AtomicBool,
    seed_fails: AtomicBool,
    seed_calls: AtomicUsize,
    requests: AtomicUsize,
}

pub fn donation_form() -> NewDonation {
    NewDonation {
        donor_name: "Priya Patel".into(),
        email: "priya@example.com".into(),
        phone: "555-0199".into(),
        address: "9 Orchard Lane".into(),
        city: "Eco City".into(),
        postal_code: "12345".into(),
        pickup_date: "2024-06-01".into(),
        pickup_time: "10:00 AM".into(),
        categories: vec![ClothingCategory::Men],
        estimated_weight: Some(4.0),
        special_instructions: None,
    }
}

pub fn item(name: &str, category: ClothingCategory, price: rust_decimal::Decimal) -> NewThriftItem {
    NewThriftItem {
        name: name.into(),
        description: format!("{} in good condition", name),
        category,
        size: Size::M,
        condition: ClothingCondition::Good,
        price,
        original_donation_id: None,
        images: vec![],
    }
}

impl FakeBackend {
    /// Three items and two donations, one of them completed.
    pub fn seeded() -> Self {
        let backend = Self::default();
        backend.reset();
        backend
    }

    fn reset(&self) {
        let now = Utc::now();
        *self.items.lock().unwrap() = vec![
            ThriftItem::list(item("Denim Jacket", ClothingCategory::Men, dec!(35.99)), now),
            ThriftItem::list(item("Summer Shirt", ClothingCategory::Men, dec!(19.99)), now),
            ThriftItem::list(item("Floral Sweater", ClothingCategory::Women, dec!(28.50)), now),
        ];
        let mut completed = Donation::schedule(donation_form(), now);
        completed.apply_status(DonationStatus::Completed, None, now);
        let mut second = donation_form();
        second.email = "michael@example.com".into();
        *self.donations.lock().unwrap() = vec![completed, Donation::schedule(second, now)];
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn fail_seed(&self) {
        self.seed_fails.store(true, Ordering::SeqCst);
    }

    pub fn seed_calls(&self) -> usize {
        self.seed_calls.load(Ordering::SeqCst)
    }

    /// Number of calls that reached the backend, seeding excluded.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn donations(&self) -> Vec<Donation> {
        self.donations.lock().unwrap().clone()
    }

    pub fn items(&self) -> Vec<ThriftItem> {
        self.items.lock().unwrap().clone()
    }

    fn reach(&self) -> PortResult<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ThriftBackend for FakeBackend {
    async fn seed_sample_data(&self) -> PortResult<()> {
        self.seed_calls.fetch_add(1, Ordering::SeqCst);
        if self.seed_fails.load(Ordering::SeqCst) || self.offline.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("seeding disabled".into()));
        }
        self.reset();
        Ok(())
    }

    async fn create_donation(&self, donation: &NewDonation) -> PortResult<Donation> {
        self.reach()?;
        let donation = Donation::schedule(donation.clone(), Utc::now());
        self.donations.lock().unwrap().insert(0, donation.clone());
        Ok(donation)
    }

    async fn get_donation(&self, tracking_id: &str) -> PortResult<Donation> {
        self.reach()?;
        self.donations
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.tracking_id.as_str() == tracking_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("Donation not found".into()))
    }

    async fn list_donations(&self) -> PortResult<Vec<Donation>> {
        self.reach()?;
        Ok(self.donations())
    }

    async fn update_donation_status(
        &self,
        donation_id: Uuid,
        status: DonationStatus,
        assigned_agent: Option<&str>,
    ) -> PortResult<Donation> {
        self.reach()?;
        let mut donations = self.donations.lock().unwrap();
        let donation = donations
            .iter_mut()
            .find(|d| d.id == donation_id)
            .ok_or_else(|| PortError::NotFound("Donation not found".into()))?;
        donation.apply_status(status, assigned_agent.map(str::to_string), Utc::now());
        Ok(donation.clone())
    }

    async fn list_thrift_items(&self) -> PortResult<Vec<ThriftItem>> {
        self.reach()?;
        Ok(self.items())
    }

    async fn create_thrift_item(&self, item: &NewThriftItem) -> PortResult<ThriftItem> {
        self.reach()?;
        let item = ThriftItem::list(item.clone(), Utc::now());
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn impact_stats(&self) -> PortResult<ImpactStats> {
        self.reach()?;
        Ok(ImpactStats::aggregate(&self.donations(), &self.items()))
    }
}
