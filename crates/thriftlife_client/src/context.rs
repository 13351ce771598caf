//! crates/thriftlife_client/src/context.rs
//!
//! State shared by every page, fetched once at application start.

use std::sync::Arc;

use thriftlife_core::domain::ImpactStats;
use thriftlife_core::ports::ThriftBackend;
use tracing::{info, warn};

use crate::error::ClientError;

/// Read-only context handed to each view at construction.
///
/// `initialize` is the only way to (re)build it. Views hold a clone and never
/// mutate it.
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    impact: Option<Arc<ImpactStats>>,
}

impl AppContext {
    /// Seeds the backend, then fetches impact statistics once.
    ///
    /// A failed seed is logged and does not prevent the stats fetch. A failed
    /// stats fetch yields a context without stats, alongside the error.
    pub async fn initialize(backend: &dyn ThriftBackend) -> (Self, Option<ClientError>) {
        if let Err(e) = backend.seed_sample_data().await {
            warn!("Sample data could not be seeded: {}", e);
        }

        match backend.impact_stats().await {
            Ok(stats) => {
                info!(
                    "Loaded impact stats: {:.1} kg collected from {} donors",
                    stats.total_clothes_collected_kg, stats.total_donors
                );
                (Self::with_stats(stats), None)
            }
            Err(e) => {
                warn!("Impact stats unavailable: {}", e);
                (Self::default(), Some(ClientError::load("impact statistics", e)))
            }
        }
    }

    pub fn with_stats(stats: ImpactStats) -> Self {
        Self {
            impact: Some(Arc::new(stats)),
        }
    }

    pub fn impact_stats(&self) -> Option<&ImpactStats> {
        self.impact.as_deref()
    }
}
