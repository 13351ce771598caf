//! crates/thriftlife_core/src/cart.rs
//!
//! The session-local shopping cart. Nothing here is persisted; checkout is not
//! part of this system.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::ThriftItem;

/// One selected item and how many of it. `quantity` is never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry {
    pub item: ThriftItem,
    pub quantity: u32,
}

impl CartEntry {
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}

/// Selected items keyed by item identity, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, item_id: Uuid) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.item.id == item_id)
    }

    /// Total number of units across all entries.
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Adds one unit of the item, creating its entry if needed.
    pub fn add_item(&mut self, item: &ThriftItem) {
        match self.entries.iter_mut().find(|e| e.item.id == item.id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
            None => self.entries.push(CartEntry {
                item: item.clone(),
                quantity: 1,
            }),
        }
    }

    /// Sets an entry's quantity. Zero removes the entry; unknown ids are ignored.
    pub fn set_quantity(&mut self, item_id: Uuid, quantity: u32) {
        if quantity == 0 {
            self.remove_item(item_id);
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item.id == item_id) {
            entry.quantity = quantity;
        }
    }

    /// Lowers an entry by one unit, flooring at zero (which removes it).
    pub fn decrement(&mut self, item_id: Uuid) {
        if let Some(quantity) = self.get(item_id).map(|e| e.quantity) {
            self.set_quantity(item_id, quantity.saturating_sub(1));
        }
    }

    pub fn remove_item(&mut self, item_id: Uuid) {
        self.entries.retain(|e| e.item.id != item_id);
    }

    /// Exact sum of `price * quantity`.
    pub fn subtotal(&self) -> Decimal {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Subtotal rounded to cents for display.
    pub fn total(&self) -> Decimal {
        self.subtotal()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
