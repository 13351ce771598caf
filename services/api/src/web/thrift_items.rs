//! services/api/src/web/thrift_items.rs
//!
//! Handlers for the thrift store catalog.

use crate::error::ApiError;
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use thriftlife_core::catalog::CatalogFilter;
use thriftlife_core::domain::{ClothingCategory, ClothingCondition, NewThriftItem, Size, ThriftItem};
use tracing::{info, warn};
use utoipa::IntoParams;
use uuid::Uuid;

/// Optional catalog constraints. Absent parameters constrain nothing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    pub category: Option<ClothingCategory>,
    pub size: Option<Size>,
    pub condition: Option<ClothingCondition>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl ItemQuery {
    /// Applies the query to the stored items, keeping only those still for sale.
    pub fn select(&self, items: Vec<ThriftItem>) -> Vec<ThriftItem> {
        let filter = CatalogFilter {
            category: self.category,
            size: self.size,
            condition: self.condition,
            max_price: self.max_price,
            search: None,
        };
        items
            .into_iter()
            .filter(|item| item.is_available && filter.matches(item))
            .filter(|item| self.min_price.map_or(true, |min| item.price >= min))
            .collect()
    }
}

/// List items currently for sale.
#[utoipa::path(
    get,
    path = "/api/thrift-items",
    params(ItemQuery),
    responses(
        (status = 200, description = "Matching items", body = [ThriftItem])
    )
)]
pub async fn list_items_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<Vec<ThriftItem>>, ApiError> {
    let items = state.db.list_thrift_items().await?;
    Ok(Json(query.select(items)))
}

/// Add an item to the thrift store (admin).
#[utoipa::path(
    post,
    path = "/api/thrift-items",
    request_body = NewThriftItem,
    responses(
        (status = 201, description = "Item listed", body = ThriftItem),
        (status = 400, description = "Invalid item")
    )
)]
pub async fn create_item_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewThriftItem>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = input.validate() {
        warn!("Rejected thrift item: {}", e);
        return Err(e.into());
    }
    let item = ThriftItem::list(input, Utc::now());
    state.db.insert_thrift_item(&item).await?;
    info!("Listed thrift item {} at {}", item.name, item.price);
    Ok((StatusCode::CREATED, Json(item)))
}

/// Fetch a single item.
#[utoipa::path(
    get,
    path = "/api/thrift-items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = ThriftItem),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ThriftItem>, ApiError> {
    Ok(Json(state.db.get_thrift_item(id).await?))
}
