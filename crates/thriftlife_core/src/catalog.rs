//! crates/thriftlife_core/src/catalog.rs
//!
//! Predicate filtering over the thrift catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{ClothingCategory, ClothingCondition, Size, ThriftItem};

/// The shop's filter bar. Every absent field is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub category: Option<ClothingCategory>,
    pub size: Option<Size>,
    pub condition: Option<ClothingCondition>,
    /// Inclusive upper bound.
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Resets all five constraints at once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none()
            && self.size.is_none()
            && self.condition.is_none()
            && self.max_price.is_none()
            && self.search_needle().is_none()
    }

    // Blank search text constrains nothing.
    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// True when the item satisfies every present constraint.
    pub fn matches(&self, item: &ThriftItem) -> bool {
        self.matches_with(item, self.search_needle().as_deref())
    }

    fn matches_with(&self, item: &ThriftItem, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = item.name.to_lowercase().contains(needle)
                || item.description.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }
        self.category.map_or(true, |c| item.category == c)
            && self.size.map_or(true, |s| item.size == s)
            && self.condition.map_or(true, |c| item.condition == c)
            && self.max_price.map_or(true, |max| item.price <= max)
    }

    /// Recomputes the filtered view from scratch, preserving input order.
    pub fn apply(&self, items: &[ThriftItem]) -> Vec<ThriftItem> {
        let needle = self.search_needle();
        items
            .iter()
            .filter(|item| self.matches_with(item, needle.as_deref()))
            .cloned()
            .collect()
    }
}
