//! crates/thriftlife_client/src/views/impact.rs
//!
//! The environmental impact page. The figures come from the shared context;
//! this view only animates them.

use std::time::Duration;

use thriftlife_core::domain::ImpactStats;
use thriftlife_core::{CountUp, HeadlineFrame};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::context::AppContext;

pub struct ImpactView {
    context: AppContext,
    count_up: Option<CountUp>,
}

impl ImpactView {
    pub fn new(context: &AppContext) -> Self {
        Self {
            count_up: context.impact_stats().map(|s| CountUp::new(s.headline())),
            context: context.clone(),
        }
    }

    /// Replaces the default two second, sixty step animation.
    pub fn with_timing(mut self, steps: u32, duration: Duration) -> Self {
        self.count_up = self
            .context
            .impact_stats()
            .map(|s| CountUp::with_timing(s.headline(), steps, duration));
        self
    }

    /// `None` when the stats could not be loaded at startup.
    pub fn stats(&self) -> Option<&ImpactStats> {
        self.context.impact_stats()
    }

    /// The values displayed once the animation is over.
    pub fn settled(&self) -> HeadlineFrame {
        self.count_up
            .map(|c| c.frame(c.steps()))
            .unwrap_or_default()
    }

    /// Starts the count-up on the runtime. The receiver starts at zero and
    /// ends on the settled values unless `cancel` fires first.
    pub fn start(&self, cancel: CancellationToken) -> (watch::Receiver<HeadlineFrame>, JoinHandle<bool>) {
        let (tx, rx) = watch::channel(HeadlineFrame::default());
        let handle = match self.count_up {
            Some(count_up) => tokio::spawn(animate(count_up, tx, cancel)),
            None => tokio::spawn(async { false }),
        };
        (rx, handle)
    }
}

/// Publishes one frame per interval. Returns whether the last frame was reached.
pub async fn animate(
    count_up: CountUp,
    frames: watch::Sender<HeadlineFrame>,
    cancel: CancellationToken,
) -> bool {
    let mut ticker = tokio::time::interval(count_up.frame_interval().max(Duration::from_millis(1)));
    // The first tick completes immediately.
    ticker.tick().await;
    for frame in count_up.frames() {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Impact animation cancelled");
                return false;
            }
            _ = ticker.tick() => {}
        }
        if frames.send(frame).is_err() {
            return false;
        }
    }
    true
}
