//! crates/thriftlife_core/src/domain.rs
//!
//! Defines the core data structures shared by the backend and the browsing client.
//! They serialize to the JSON shapes exchanged over the REST API, but carry no
//! database or transport concerns.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::validation::ValidationError;

/// Image used for thrift items created without any photos.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=No+Image";

/// Points awarded per kilogram of donated clothing.
pub const POINTS_PER_KG: f64 = 10.0;

//=========================================================================================
// Enumerations
//=========================================================================================

/// Clothing category tag used by donations and thrift items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ClothingCategory {
    Men,
    Women,
    Kids,
    Accessories,
    #[serde(rename = "Mixed/Textile Waste")]
    Mixed,
}

impl ClothingCategory {
    pub const ALL: [Self; 5] = [
        Self::Men,
        Self::Women,
        Self::Kids,
        Self::Accessories,
        Self::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
            Self::Kids => "Kids",
            Self::Accessories => "Accessories",
            Self::Mixed => "Mixed/Textile Waste",
        }
    }
}

/// Garment size of a thrift item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl Size {
    pub const ALL: [Self; 6] = [Self::XS, Self::S, Self::M, Self::L, Self::XL, Self::XXL];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XS => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
            Self::XXL => "XXL",
        }
    }
}

/// Physical condition of a thrift item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ClothingCondition {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Repair")]
    NeedsRepair,
}

impl ClothingCondition {
    pub const ALL: [Self; 4] = [Self::Excellent, Self::Good, Self::Fair, Self::NeedsRepair];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsRepair => "Needs Repair",
        }
    }
}

/// Lifecycle status of a donation.
///
/// Variants are declared in progression order, so the derived `Ord` is the
/// order a donation moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum DonationStatus {
    Scheduled,
    #[serde(rename = "Picked Up")]
    PickedUp,
    Processed,
    Completed,
}

impl DonationStatus {
    /// All statuses in progression order.
    pub const PROGRESSION: [Self; 4] = [
        Self::Scheduled,
        Self::PickedUp,
        Self::Processed,
        Self::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::PickedUp => "Picked Up",
            Self::Processed => "Processed",
            Self::Completed => "Completed",
        }
    }

    /// Position of this status in [`Self::PROGRESSION`].
    pub fn index(&self) -> usize {
        match self {
            Self::Scheduled => 0,
            Self::PickedUp => 1,
            Self::Processed => 2,
            Self::Completed => 3,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// A transition is forward-only: the target may equal or follow the current status.
    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        next >= *self
    }
}

macro_rules! impl_label {
    ($ty:ty, $all:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::$all
                    .iter()
                    .find(|v| v.as_str() == s)
                    .copied()
                    .ok_or_else(|| format!("invalid {}: {s}", $what))
            }
        }
    };
}

impl_label!(ClothingCategory, ALL, "category");
impl_label!(Size, ALL, "size");
impl_label!(ClothingCondition, ALL, "condition");
impl_label!(DonationStatus, PROGRESSION, "donation status");

//=========================================================================================
// Tracking Identifier
//=========================================================================================

/// Public identifier of a donation: `DN` followed by eight digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    pub const PREFIX: &'static str = "DN";
    const DIGITS: usize = 8;

    /// Issues a fresh identifier from a random UUID.
    pub fn generate() -> Self {
        let n = Uuid::new_v4().as_u128() % 10u128.pow(Self::DIGITS as u32);
        Self(format!("{}{:0width$}", Self::PREFIX, n, width = Self::DIGITS))
    }

    /// Accepts any `DN` + digits string.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.trim().strip_prefix(Self::PREFIX)?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(Self(s.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//=========================================================================================
// Donations
//=========================================================================================

/// The fields a donor fills in when scheduling a pickup.
///
/// Omitted keys deserialize as empty so that `validate` can name them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct NewDonation {
    pub donor_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub pickup_date: String,
    pub pickup_time: String,
    pub categories: Vec<ClothingCategory>,
    pub estimated_weight: Option<f64>,
    pub special_instructions: Option<String>,
}

impl NewDonation {
    /// Checks the fields required to schedule a pickup.
    ///
    /// Reports the first missing field in form order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("donor_name", &self.donor_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("pickup_date", &self.pickup_date),
            ("pickup_time", &self.pickup_time),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }
        if self.categories.is_empty() {
            return Err(ValidationError::NoCategories);
        }
        match self.estimated_weight {
            Some(w) if !w.is_finite() || w < 0.0 => Err(ValidationError::NegativeWeight),
            _ => Ok(()),
        }
    }
}

/// A scheduled clothing pickup and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Donation {
    pub id: Uuid,
    pub tracking_id: TrackingId,
    pub donor_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub pickup_date: String,
    pub pickup_time: String,
    pub categories: Vec<ClothingCategory>,
    pub estimated_weight: Option<f64>,
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub status: DonationStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub assigned_agent: Option<String>,
    pub points_earned: u32,
}

impl Donation {
    /// Builds a freshly scheduled donation from validated form input.
    pub fn schedule(input: NewDonation, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tracking_id: TrackingId::generate(),
            donor_name: input.donor_name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            city: input.city,
            postal_code: input.postal_code,
            pickup_date: input.pickup_date,
            pickup_time: input.pickup_time,
            categories: input.categories,
            estimated_weight: input.estimated_weight,
            special_instructions: input.special_instructions,
            photos: Vec::new(),
            status: DonationStatus::Scheduled,
            created_at: now,
            processed_at: None,
            assigned_agent: None,
            points_earned: 0,
        }
    }

    /// Applies a status change, stamping completion data when the donation finishes
    /// and clearing it again if a completed donation is moved back.
    ///
    /// An absent agent leaves the current assignment untouched.
    pub fn apply_status(
        &mut self,
        status: DonationStatus,
        assigned_agent: Option<String>,
        now: DateTime<Utc>,
    ) {
        if status.is_terminal() && !self.status.is_terminal() {
            self.processed_at = Some(now);
            self.points_earned = points_for_weight(self.estimated_weight);
        } else if !status.is_terminal() && self.status.is_terminal() {
            self.processed_at = None;
            self.points_earned = 0;
        }
        self.status = status;
        if let Some(agent) = assigned_agent.filter(|a| !a.trim().is_empty()) {
            self.assigned_agent = Some(agent);
        }
    }

    /// Carbon saved by this donation, as shown next to the tracking timeline.
    pub fn carbon_saved_kg(&self) -> f64 {
        crate::impact::carbon_saved_kg(self.estimated_weight.unwrap_or(0.0))
    }
}

/// Points earned for a donation of the given weight.
pub fn points_for_weight(weight: Option<f64>) -> u32 {
    match weight {
        Some(w) if w.is_finite() && w > 0.0 => (w * POINTS_PER_KG).floor() as u32,
        _ => 0,
    }
}

//=========================================================================================
// Thrift Items
//=========================================================================================

/// The fields staff fill in when listing an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewThriftItem {
    pub name: String,
    pub description: String,
    pub category: ClothingCategory,
    pub size: Size,
    pub condition: ClothingCondition,
    pub price: Decimal,
    #[serde(default)]
    pub original_donation_id: Option<Uuid>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewThriftItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice);
        }
        Ok(())
    }
}

/// A secondhand item listed in the thrift catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ThriftItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: ClothingCategory,
    pub size: Size,
    pub condition: ClothingCondition,
    pub price: Decimal,
    pub original_donation_id: Option<Uuid>,
    pub images: Vec<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub sold_at: Option<DateTime<Utc>>,
}

impl ThriftItem {
    /// Lists a new item, substituting the placeholder image when none were given.
    pub fn list(input: NewThriftItem, now: DateTime<Utc>) -> Self {
        let images = if input.images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            input.images
        };
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            category: input.category,
            size: input.size,
            condition: input.condition,
            price: input.price,
            original_donation_id: input.original_donation_id,
            images,
            is_available: true,
            created_at: now,
            sold_at: None,
        }
    }

    pub fn is_sold(&self) -> bool {
        self.sold_at.is_some()
    }
}

//=========================================================================================
// Users
//=========================================================================================

/// Profile fields supplied when registering a donor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        Ok(())
    }
}

/// A donor profile. Carries no credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub total_donations: u32,
    pub total_points: u32,
    pub badges: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_donation: Option<DateTime<Utc>>,
}

impl User {
    pub fn register(input: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            total_donations: 0,
            total_points: 0,
            badges: Vec::new(),
            created_at: now,
            last_donation: None,
        }
    }
}

//=========================================================================================
// Impact Statistics
//=========================================================================================

/// Aggregate environmental counters, computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ImpactStats {
    pub total_clothes_collected_kg: f64,
    pub total_items_reused: u64,
    pub total_items_recycled: u64,
    pub carbon_footprint_saved_kg: f64,
    pub total_donors: u64,
    pub total_revenue_generated: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_match_the_wire_format() {
        let json = serde_json::to_string(&DonationStatus::PickedUp).unwrap();
        assert_eq!(json, "\"Picked Up\"");
        let parsed: ClothingCategory = serde_json::from_str("\"Mixed/Textile Waste\"").unwrap();
        assert_eq!(parsed, ClothingCategory::Mixed);
        assert_eq!("Needs Repair".parse::<ClothingCondition>(), Ok(ClothingCondition::NeedsRepair));
        assert!("Shipped".parse::<DonationStatus>().is_err());
    }

    #[test]
    fn status_order_is_forward_only() {
        assert!(DonationStatus::Scheduled.can_transition_to(DonationStatus::Processed));
        assert!(DonationStatus::Processed.can_transition_to(DonationStatus::Processed));
        assert!(!DonationStatus::Completed.can_transition_to(DonationStatus::PickedUp));
        for (i, s) in DonationStatus::PROGRESSION.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn generated_tracking_ids_are_dn_plus_digits() {
        for _ in 0..50 {
            let id = TrackingId::generate();
            let digits = id.as_str().strip_prefix("DN").unwrap();
            assert_eq!(digits.len(), 8);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(TrackingId::parse(id.as_str()), Some(id));
        }
        assert!(TrackingId::parse("DN").is_none());
        assert!(TrackingId::parse("DN12AB").is_none());
        assert!(TrackingId::parse("XX1234").is_none());
    }

    fn sample_form() -> NewDonation {
        NewDonation {
            donor_name: "Sarah Johnson".into(),
            email: "sarah@example.com".into(),
            phone: "555-0101".into(),
            address: "123 Green Street".into(),
            city: "Eco City".into(),
            postal_code: "12345".into(),
            pickup_date: "2024-06-01".into(),
            pickup_time: "10:00 AM".into(),
            categories: vec![ClothingCategory::Men],
            estimated_weight: Some(5.5),
            special_instructions: None,
        }
    }

    #[test]
    fn validation_reports_the_first_missing_field() {
        assert_eq!(sample_form().validate(), Ok(()));

        let mut form = sample_form();
        form.phone = "  ".into();
        form.pickup_time.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingField("phone")));

        let mut form = sample_form();
        form.categories.clear();
        assert_eq!(form.validate(), Err(ValidationError::NoCategories));

        let mut form = sample_form();
        form.estimated_weight = Some(-1.0);
        assert_eq!(form.validate(), Err(ValidationError::NegativeWeight));
    }

    #[test]
    fn points_are_assigned_on_completion_only() {
        let now = Utc::now();
        let mut donation = Donation::schedule(sample_form(), now);
        assert_eq!(donation.status, DonationStatus::Scheduled);
        assert_eq!(donation.points_earned, 0);

        donation.apply_status(DonationStatus::Processed, Some("Agent-001".into()), now);
        assert_eq!(donation.points_earned, 0);
        assert!(donation.processed_at.is_none());
        assert_eq!(donation.assigned_agent.as_deref(), Some("Agent-001"));

        donation.apply_status(DonationStatus::Completed, None, now);
        assert_eq!(donation.points_earned, 55);
        assert_eq!(donation.processed_at, Some(now));
        assert_eq!(donation.assigned_agent.as_deref(), Some("Agent-001"));
    }

    #[test]
    fn moving_back_from_completed_drops_completion_data() {
        let now = Utc::now();
        let mut donation = Donation::schedule(sample_form(), now);
        donation.apply_status(DonationStatus::Completed, None, now);
        assert_eq!(donation.points_earned, 55);

        donation.apply_status(DonationStatus::Processed, None, now);
        assert_eq!(donation.points_earned, 0);
        assert!(donation.processed_at.is_none());
    }

    #[test]
    fn omitted_form_keys_are_reported_by_validation() {
        let form: NewDonation = serde_json::from_value(serde_json::json!({
            "donor_name": "Priya Patel",
            "email": "priya@example.com",
            "phone": "555-0199",
            "address": "9 Orchard Lane",
            "pickup_date": "2024-06-01",
            "pickup_time": "10:00 AM"
        }))
        .unwrap();
        assert!(form.city.is_empty());
        assert!(form.postal_code.is_empty());
        assert_eq!(form.validate(), Err(ValidationError::NoCategories));
    }

    #[test]
    fn carbon_uses_the_fixed_emission_factor() {
        let donation = Donation::schedule(sample_form(), Utc::now());
        assert!((donation.carbon_saved_kg() - 11.55).abs() < 1e-9);
    }

    #[test]
    fn listing_without_images_uses_the_placeholder() {
        let item = ThriftItem::list(
            NewThriftItem {
                name: "Denim Jacket".into(),
                description: "Blue".into(),
                category: ClothingCategory::Men,
                size: Size::M,
                condition: ClothingCondition::Good,
                price: Decimal::new(3599, 2),
                original_donation_id: None,
                images: vec![],
            },
            Utc::now(),
        );
        assert_eq!(item.images, vec![PLACEHOLDER_IMAGE.to_string()]);
        assert!(item.is_available);
        assert!(!item.is_sold());
    }
}
