//! services/api/src/seed.rs
//!
//! Sample catalog and donation data for development. Seeding only touches an
//! empty store, so running it again never disturbs data that is already there.

use chrono::Utc;
use rust_decimal::Decimal;
use thriftlife_core::domain::{
    ClothingCategory, ClothingCondition, Donation, DonationStatus, NewDonation, NewThriftItem,
    Size, ThriftItem,
};
use thriftlife_core::ports::{DatabaseService, PortResult};
use tracing::info;

fn sample_item(
    name: &str,
    description: &str,
    category: ClothingCategory,
    size: Size,
    condition: ClothingCondition,
    price_cents: i64,
    image: &str,
) -> NewThriftItem {
    NewThriftItem {
        name: name.to_string(),
        description: description.to_string(),
        category,
        size,
        condition,
        price: Decimal::new(price_cents, 2),
        original_donation_id: None,
        images: vec![image.to_string()],
    }
}

pub fn sample_items() -> Vec<NewThriftItem> {
    use ClothingCategory::*;
    use ClothingCondition::*;
    vec![
        sample_item(
            "Vintage Denim Jacket",
            "Classic blue denim jacket in excellent condition",
            Men,
            Size::M,
            Excellent,
            3599,
            "https://images.unsplash.com/photo-1617331721458-bd3bd3f9c7f8",
        ),
        sample_item(
            "Vintage Floral Sweater",
            "Multicolored vintage sweater with unique pattern",
            Women,
            Size::L,
            Good,
            2850,
            "https://images.unsplash.com/photo-1733026019726-ca2354a60358",
        ),
        sample_item(
            "Classic Blue Jeans",
            "Comfortable blue denim jeans",
            Women,
            Size::M,
            Good,
            2299,
            "https://images.unsplash.com/photo-1614990354198-b06764dcb13c",
        ),
        sample_item(
            "Vintage Leather Shoes",
            "Classic leather shoes in great condition",
            Accessories,
            Size::M,
            Excellent,
            4500,
            "https://images.pexels.com/photos/2918534/pexels-photo-2918534.jpeg",
        ),
        sample_item(
            "Casual Summer Shirt",
            "Light casual shirt perfect for summer",
            Men,
            Size::L,
            Good,
            1875,
            "https://images.unsplash.com/photo-1647664856968-880b8eccd588",
        ),
        sample_item(
            "Vintage Clothing Collection",
            "Assorted vintage pieces in good condition",
            Mixed,
            Size::M,
            Fair,
            3200,
            "https://images.unsplash.com/photo-1520006403909-838d6b92c22e",
        ),
    ]
}

/// Sample donations paired with the status each should end up in.
pub fn sample_donations() -> Vec<(NewDonation, DonationStatus)> {
    vec![
        (
            NewDonation {
                donor_name: "Sarah Johnson".to_string(),
                email: "sarah@example.com".to_string(),
                phone: "555-0101".to_string(),
                address: "123 Green Street".to_string(),
                city: "Eco City".to_string(),
                postal_code: "12345".to_string(),
                pickup_date: "2024-01-15".to_string(),
                pickup_time: "10:00 AM".to_string(),
                categories: vec![ClothingCategory::Women, ClothingCategory::Accessories],
                estimated_weight: Some(5.5),
                special_instructions: None,
            },
            DonationStatus::Completed,
        ),
        (
            NewDonation {
                donor_name: "Michael Chen".to_string(),
                email: "michael@example.com".to_string(),
                phone: "555-0102".to_string(),
                address: "456 Sustainability Ave".to_string(),
                city: "Green Town".to_string(),
                postal_code: "67890".to_string(),
                pickup_date: "2024-01-20".to_string(),
                pickup_time: "2:00 PM".to_string(),
                categories: vec![ClothingCategory::Men],
                estimated_weight: Some(8.2),
                special_instructions: None,
            },
            DonationStatus::Processed,
        ),
    ]
}

/// Loads the sample data set into an empty store.
///
/// Returns `false` without writing anything when the store already holds
/// donations or items.
pub async fn seed_sample_data(db: &dyn DatabaseService) -> PortResult<bool> {
    if !db.list_donations().await?.is_empty() || !db.list_thrift_items().await?.is_empty() {
        info!("Store already holds data; skipping sample seed");
        return Ok(false);
    }

    let items = sample_items();
    let item_count = items.len();
    for input in items {
        db.insert_thrift_item(&ThriftItem::list(input, Utc::now()))
            .await?;
    }

    let donations = sample_donations();
    let donation_count = donations.len();
    for (input, status) in donations {
        let now = Utc::now();
        let mut donation = Donation::schedule(input, now);
        donation.apply_status(status, None, now);
        db.insert_donation(&donation).await?;
    }

    info!(
        "Seeded {} thrift items and {} donations",
        item_count, donation_count
    );
    Ok(true)
}
