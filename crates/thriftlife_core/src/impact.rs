//! crates/thriftlife_core/src/impact.rs
//!
//! Environmental impact figures: the backend aggregation over stored donations and
//! items, and the client's count-up animation of the headline numbers.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

use crate::domain::{Donation, ImpactStats, ThriftItem};

/// Kilograms of CO2 saved per kilogram of clothing diverted from landfill.
pub const CARBON_FACTOR: f64 = 2.1;

pub fn carbon_saved_kg(weight_kg: f64) -> f64 {
    weight_kg * CARBON_FACTOR
}

impl ImpactStats {
    /// Aggregates a snapshot from everything stored.
    pub fn aggregate(donations: &[Donation], items: &[ThriftItem]) -> Self {
        let total_weight: f64 = donations
            .iter()
            .filter_map(|d| d.estimated_weight)
            .sum();
        let sold: Vec<&ThriftItem> = items.iter().filter(|i| i.is_sold()).collect();
        let reused = sold.len() as u64;
        let donors: HashSet<&str> = donations.iter().map(|d| d.email.as_str()).collect();

        Self {
            total_clothes_collected_kg: total_weight,
            total_items_reused: reused,
            total_items_recycled: (donations.len() as u64).saturating_sub(reused),
            carbon_footprint_saved_kg: carbon_saved_kg(total_weight),
            total_donors: donors.len() as u64,
            total_revenue_generated: sold.iter().map(|i| i.price).sum::<Decimal>(),
        }
    }

    /// Share of processed items that went back into circulation, in percent.
    pub fn reuse_rate_percent(&self) -> f64 {
        let handled = self.total_items_reused + self.total_items_recycled;
        if handled == 0 {
            return 0.0;
        }
        self.total_items_reused as f64 / handled as f64 * 100.0
    }

    /// The four headline figures the impact page animates towards.
    pub fn headline(&self) -> Headline {
        Headline {
            clothes_collected_kg: self.total_clothes_collected_kg,
            carbon_saved_kg: self.carbon_footprint_saved_kg,
            donors: self.total_donors as f64,
            reuse_rate_percent: self.reuse_rate_percent(),
        }
    }
}

/// Target values of the count-up animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Headline {
    pub clothes_collected_kg: f64,
    pub carbon_saved_kg: f64,
    pub donors: f64,
    pub reuse_rate_percent: f64,
}

/// One rendered step of the count-up animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadlineFrame {
    pub clothes_collected_kg: i64,
    pub carbon_saved_kg: i64,
    pub donors: i64,
    pub reuse_rate_percent: i64,
}

impl Headline {
    fn scaled(&self, progress: f64) -> HeadlineFrame {
        let at = |v: f64| (v * progress).round() as i64;
        HeadlineFrame {
            clothes_collected_kg: at(self.clothes_collected_kg),
            carbon_saved_kg: at(self.carbon_saved_kg),
            donors: at(self.donors),
            reuse_rate_percent: at(self.reuse_rate_percent),
        }
    }

    /// The values shown once the animation has finished.
    pub fn settled(&self) -> HeadlineFrame {
        self.scaled(1.0)
    }
}

/// Linear interpolation from zero to a [`Headline`] over a fixed number of steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    target: Headline,
    steps: u32,
    duration: Duration,
}

impl CountUp {
    pub const DEFAULT_STEPS: u32 = 60;
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

    pub fn new(target: Headline) -> Self {
        Self::with_timing(target, Self::DEFAULT_STEPS, Self::DEFAULT_DURATION)
    }

    /// A step count of zero is treated as one.
    pub fn with_timing(target: Headline, steps: u32, duration: Duration) -> Self {
        Self {
            target,
            steps: steps.max(1),
            duration,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Delay between two consecutive frames.
    pub fn frame_interval(&self) -> Duration {
        self.duration / self.steps
    }

    /// Frame for step `n` in `1..=steps`. The last step is always the settled value.
    pub fn frame(&self, n: u32) -> HeadlineFrame {
        if n >= self.steps {
            return self.target.settled();
        }
        self.target.scaled(f64::from(n) / f64::from(self.steps))
    }

    pub fn frames(&self) -> impl Iterator<Item = HeadlineFrame> + '_ {
        (1..=self.steps).map(move |n| self.frame(n))
    }
}
