//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use thriftlife_core::domain::{
    ClothingCategory, Donation, DonationStatus, ThriftItem, TrackingId, User,
};
use thriftlife_core::ports::{DatabaseService, PortError, PortResult};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct PgAdapter {
    pool: PgPool,
}

impl PgAdapter {
    /// Creates a new `PgAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn not_found_or(what: &str) -> impl FnOnce(sqlx::Error) -> PortError + '_ {
    move |e| match e {
        sqlx::Error::RowNotFound => PortError::NotFound(format!("{} not found", what)),
        other => unexpected(other),
    }
}

/// Narrows a points total to the `INTEGER` column type.
fn points_column(points: u32) -> PortResult<i32> {
    i32::try_from(points)
        .map_err(|_| PortError::Rejected(format!("{} points exceed the storable maximum", points)))
}

fn parse_label<T: FromStr<Err = String>>(raw: &str) -> PortResult<T> {
    raw.parse::<T>().map_err(PortError::Unexpected)
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

const DONATION_COLUMNS: &str = "id, tracking_id, donor_name, email, phone, address, city, \
     postal_code, pickup_date, pickup_time, categories, estimated_weight, special_instructions, \
     photos, status, created_at, processed_at, assigned_agent, points_earned";

#[derive(FromRow)]
struct DonationRecord {
    id: Uuid,
    tracking_id: String,
    donor_name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    postal_code: String,
    pickup_date: String,
    pickup_time: String,
    categories: Vec<String>,
    estimated_weight: Option<f64>,
    special_instructions: Option<String>,
    photos: Vec<String>,
    status: String,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    assigned_agent: Option<String>,
    points_earned: i32,
}
impl DonationRecord {
    fn to_domain(self) -> PortResult<Donation> {
        let tracking_id = TrackingId::parse(&self.tracking_id).ok_or_else(|| {
            PortError::Unexpected(format!("malformed tracking id {}", self.tracking_id))
        })?;
        let categories = self
            .categories
            .iter()
            .map(|c| parse_label(c))
            .collect::<PortResult<Vec<ClothingCategory>>>()?;
        Ok(Donation {
            id: self.id,
            tracking_id,
            donor_name: self.donor_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            pickup_date: self.pickup_date,
            pickup_time: self.pickup_time,
            categories,
            estimated_weight: self.estimated_weight,
            special_instructions: self.special_instructions,
            photos: self.photos,
            status: parse_label(&self.status)?,
            created_at: self.created_at,
            processed_at: self.processed_at,
            assigned_agent: self.assigned_agent,
            points_earned: self.points_earned.max(0) as u32,
        })
    }
}

const ITEM_COLUMNS: &str = "id, name, description, category, size, condition, price, \
     original_donation_id, images, is_available, created_at, sold_at";

#[derive(FromRow)]
struct ThriftItemRecord {
    id: Uuid,
    name: String,
    description: String,
    category: String,
    size: String,
    condition: String,
    price: Decimal,
    original_donation_id: Option<Uuid>,
    images: Vec<String>,
    is_available: bool,
    created_at: DateTime<Utc>,
    sold_at: Option<DateTime<Utc>>,
}
impl ThriftItemRecord {
    fn to_domain(self) -> PortResult<ThriftItem> {
        Ok(ThriftItem {
            id: self.id,
            name: self.name,
            description: self.description,
            category: parse_label(&self.category)?,
            size: parse_label(&self.size)?,
            condition: parse_label(&self.condition)?,
            price: self.price,
            original_donation_id: self.original_donation_id,
            images: self.images,
            is_available: self.is_available,
            created_at: self.created_at,
            sold_at: self.sold_at,
        })
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    total_donations: i32,
    total_points: i32,
    badges: Vec<String>,
    created_at: DateTime<Utc>,
    last_donation: Option<DateTime<Utc>>,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            total_donations: self.total_donations.max(0) as u32,
            total_points: self.total_points.max(0) as u32,
            badges: self.badges,
            created_at: self.created_at,
            last_donation: self.last_donation,
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for PgAdapter {
    async fn insert_donation(&self, d: &Donation) -> PortResult<()> {
        let categories: Vec<&str> = d.categories.iter().map(|c| c.as_str()).collect();
        sqlx::query(
            "INSERT INTO donations (id, tracking_id, donor_name, email, phone, address, city, \
             postal_code, pickup_date, pickup_time, categories, estimated_weight, \
             special_instructions, photos, status, created_at, processed_at, assigned_agent, \
             points_earned) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)",
        )
        .bind(d.id)
        .bind(d.tracking_id.as_str())
        .bind(&d.donor_name)
        .bind(&d.email)
        .bind(&d.phone)
        .bind(&d.address)
        .bind(&d.city)
        .bind(&d.postal_code)
        .bind(&d.pickup_date)
        .bind(&d.pickup_time)
        .bind(&categories)
        .bind(d.estimated_weight)
        .bind(&d.special_instructions)
        .bind(&d.photos)
        .bind(d.status.as_str())
        .bind(d.created_at)
        .bind(d.processed_at)
        .bind(&d.assigned_agent)
        .bind(points_column(d.points_earned)?)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => PortError::Rejected(format!(
                "Tracking ID {} already issued",
                d.tracking_id
            )),
            other => unexpected(other),
        })?;
        Ok(())
    }

    async fn list_donations(&self) -> PortResult<Vec<Donation>> {
        let sql = format!(
            "SELECT {} FROM donations ORDER BY created_at DESC",
            DONATION_COLUMNS
        );
        let records = sqlx::query_as::<_, DonationRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn get_donation_by_tracking_id(&self, tracking_id: &str) -> PortResult<Donation> {
        let sql = format!(
            "SELECT {} FROM donations WHERE tracking_id = $1",
            DONATION_COLUMNS
        );
        sqlx::query_as::<_, DonationRecord>(&sql)
            .bind(tracking_id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found_or("Donation"))?
            .to_domain()
    }

    async fn get_donation(&self, id: Uuid) -> PortResult<Donation> {
        let sql = format!("SELECT {} FROM donations WHERE id = $1", DONATION_COLUMNS);
        sqlx::query_as::<_, DonationRecord>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found_or("Donation"))?
            .to_domain()
    }

    async fn save_donation_status(&self, d: &Donation, forward_only: bool) -> PortResult<()> {
        let points = points_column(d.points_earned)?;
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        // The row lock holds concurrent updates until this one commits.
        let current: String =
            sqlx::query_scalar("SELECT status FROM donations WHERE id = $1 FOR UPDATE")
                .bind(d.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(not_found_or("Donation"))?;
        let current: DonationStatus = parse_label(&current)?;
        if forward_only && !current.can_transition_to(d.status) {
            return Err(PortError::Rejected(format!(
                "Donation is already {}",
                current
            )));
        }

        sqlx::query(
            "UPDATE donations SET status = $1, assigned_agent = $2, processed_at = $3, \
             points_earned = $4 WHERE id = $5",
        )
        .bind(d.status.as_str())
        .bind(&d.assigned_agent)
        .bind(d.processed_at)
        .bind(points)
        .bind(d.id)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;
        tx.commit().await.map_err(unexpected)
    }

    async fn insert_thrift_item(&self, item: &ThriftItem) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO thrift_items (id, name, description, category, size, condition, price, \
             original_donation_id, images, is_available, created_at, sold_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.category.as_str())
        .bind(item.size.as_str())
        .bind(item.condition.as_str())
        .bind(item.price)
        .bind(item.original_donation_id)
        .bind(&item.images)
        .bind(item.is_available)
        .bind(item.created_at)
        .bind(item.sold_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn list_thrift_items(&self) -> PortResult<Vec<ThriftItem>> {
        let sql = format!(
            "SELECT {} FROM thrift_items ORDER BY created_at ASC",
            ITEM_COLUMNS
        );
        let records = sqlx::query_as::<_, ThriftItemRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn get_thrift_item(&self, id: Uuid) -> PortResult<ThriftItem> {
        let sql = format!("SELECT {} FROM thrift_items WHERE id = $1", ITEM_COLUMNS);
        sqlx::query_as::<_, ThriftItemRecord>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found_or("Item"))?
            .to_domain()
    }

    async fn insert_user(&self, user: &User) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, phone, address, total_donations, total_points, \
             badges, created_at, last_donation) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.total_donations as i32)
        .bind(points_column(user.total_points)?)
        .bind(&user.badges)
        .bind(user.created_at)
        .bind(user.last_donation)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, phone, address, total_donations, total_points, badges, \
             created_at, last_donation FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found_or("User"))?;
        Ok(record.to_domain())
    }
}
