//! crates/thriftlife_client/src/views/shop.rs
//!
//! The thrift store: catalog filters plus the session cart.

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thriftlife_core::domain::{ClothingCategory, ClothingCondition, Size, ThriftItem};
use thriftlife_core::ports::ThriftBackend;
use thriftlife_core::{Cart, CatalogFilter, ValidationError};
use uuid::Uuid;

use super::{Notice, Notices, View};
use crate::error::ClientError;

#[derive(Debug)]
pub enum ShopMsg {
    Load,
    Loaded(Result<Vec<ThriftItem>, ClientError>),
    SetCategory(Option<ClothingCategory>),
    SetSize(Option<Size>),
    SetCondition(Option<ClothingCondition>),
    /// Raw text of the max price input. Blank removes the bound.
    SetMaxPrice(String),
    SetSearch(String),
    ClearFilters,
    AddToCart(Uuid),
    SetQuantity(Uuid, u32),
    Decrement(Uuid),
    RemoveFromCart(Uuid),
}

#[derive(Debug)]
pub enum ShopEffect {
    LoadItems,
}

#[derive(Debug, Default)]
pub struct ShopView {
    items: Vec<ThriftItem>,
    filter: CatalogFilter,
    visible: Vec<ThriftItem>,
    cart: Cart,
    loading: bool,
    pub notices: Notices,
}

impl ShopView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// Items passing the current filter, in catalog order.
    pub fn visible_items(&self) -> &[ThriftItem] {
        &self.visible
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    fn refilter(&mut self) {
        self.visible = self.filter.apply(&self.items);
    }

    fn set_max_price(&mut self, raw: &str) {
        let raw = raw.trim();
        if raw.is_empty() {
            self.filter.max_price = None;
            return;
        }
        match Decimal::from_str(raw) {
            Ok(price) => self.filter.max_price = Some(price),
            Err(_) => self
                .notices
                .fail(&ClientError::from(ValidationError::InvalidNumber("max price"))),
        }
    }

    fn add_to_cart(&mut self, item_id: Uuid) {
        let Some(item) = self.items.iter().find(|i| i.id == item_id) else {
            return;
        };
        self.cart.add_item(item);
        self.notices
            .push(Notice::success(format!("{} added to cart!", item.name)));
    }

    fn remove_from_cart(&mut self, item_id: Uuid) {
        if self.cart.get(item_id).is_some() {
            self.cart.remove_item(item_id);
            self.notices.push(Notice::info("Item removed from cart"));
        }
    }
}

#[async_trait]
impl View for ShopView {
    type Msg = ShopMsg;
    type Effect = ShopEffect;

    fn update(&mut self, msg: ShopMsg) -> Option<ShopEffect> {
        match msg {
            ShopMsg::Load if self.loading => return None,
            ShopMsg::Load => {
                self.loading = true;
                return Some(ShopEffect::LoadItems);
            }
            ShopMsg::Loaded(outcome) => {
                self.loading = false;
                match outcome {
                    Ok(items) => self.items = items,
                    Err(e) => self.notices.fail(&e),
                }
            }
            ShopMsg::SetCategory(category) => self.filter.category = category,
            ShopMsg::SetSize(size) => self.filter.size = size,
            ShopMsg::SetCondition(condition) => self.filter.condition = condition,
            ShopMsg::SetMaxPrice(raw) => self.set_max_price(&raw),
            ShopMsg::SetSearch(text) => self.filter.search = Some(text),
            ShopMsg::ClearFilters => self.filter.clear(),
            ShopMsg::AddToCart(id) => self.add_to_cart(id),
            ShopMsg::SetQuantity(id, 0) => self.remove_from_cart(id),
            ShopMsg::SetQuantity(id, quantity) => self.cart.set_quantity(id, quantity),
            ShopMsg::Decrement(id) => match self.cart.get(id).map(|e| e.quantity) {
                Some(1) => self.remove_from_cart(id),
                Some(_) => self.cart.decrement(id),
                None => {}
            },
            ShopMsg::RemoveFromCart(id) => self.remove_from_cart(id),
        }
        self.refilter();
        None
    }

    async fn run(backend: &dyn ThriftBackend, effect: ShopEffect) -> ShopMsg {
        match effect {
            ShopEffect::LoadItems => ShopMsg::Loaded(
                backend
                    .list_thrift_items()
                    .await
                    .map_err(|e| ClientError::load("items", e)),
            ),
        }
    }
}
