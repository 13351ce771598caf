//! crates/thriftlife_client/src/views/tracking.rs
//!
//! Public donation lookup by tracking identifier.

use async_trait::async_trait;
use thriftlife_core::domain::Donation;
use thriftlife_core::ports::ThriftBackend;
use thriftlife_core::tracking::{compute_timeline, status_description, timeline_for, TimelineStep};
use thriftlife_core::ValidationError;

use super::{Notices, View};
use crate::error::ClientError;

#[derive(Debug)]
pub enum TrackingMsg {
    EditQuery(String),
    Search,
    Found(Result<Donation, ClientError>),
}

#[derive(Debug)]
pub enum TrackingEffect {
    Lookup(String),
}

#[derive(Debug, Default)]
pub struct TrackingView {
    pub query: String,
    donation: Option<Donation>,
    loading: bool,
    searched: bool,
    pub notices: Notices,
}

impl TrackingView {
    /// Starts with a pre-filled identifier, e.g. taken from a link.
    pub fn new(initial_query: Option<String>) -> Self {
        Self {
            query: initial_query.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once a lookup has completed, successfully or not.
    pub fn has_searched(&self) -> bool {
        self.searched
    }

    pub fn donation(&self) -> Option<&Donation> {
        self.donation.as_ref()
    }

    /// The four-stage progress of the displayed donation. Nothing is completed
    /// when no donation is shown.
    pub fn timeline(&self) -> Vec<TimelineStep> {
        match &self.donation {
            Some(donation) => timeline_for(donation),
            None => compute_timeline(None),
        }
    }

    pub fn description(&self) -> &'static str {
        status_description(self.donation.as_ref().map(|d| d.status))
    }

    /// Points are only shown once the donation is completed.
    pub fn points(&self) -> Option<u32> {
        self.donation
            .as_ref()
            .filter(|d| d.status.is_terminal())
            .map(|d| d.points_earned)
    }

    pub fn carbon_saved_kg(&self) -> Option<f64> {
        self.donation.as_ref().map(Donation::carbon_saved_kg)
    }
}

#[async_trait]
impl View for TrackingView {
    type Msg = TrackingMsg;
    type Effect = TrackingEffect;

    fn update(&mut self, msg: TrackingMsg) -> Option<TrackingEffect> {
        match msg {
            TrackingMsg::EditQuery(query) => self.query = query,
            TrackingMsg::Search if self.loading => {}
            TrackingMsg::Search => {
                let query = self.query.trim();
                if query.is_empty() {
                    self.notices
                        .fail(&ClientError::from(ValidationError::EmptyTrackingId));
                    return None;
                }
                self.loading = true;
                return Some(TrackingEffect::Lookup(query.to_string()));
            }
            TrackingMsg::Found(outcome) => {
                self.loading = false;
                self.searched = true;
                match outcome {
                    Ok(donation) => self.donation = Some(donation),
                    Err(e) => {
                        if matches!(e, ClientError::NotFound) {
                            self.donation = None;
                        }
                        self.notices.fail(&e);
                    }
                }
            }
        }
        None
    }

    async fn run(backend: &dyn ThriftBackend, effect: TrackingEffect) -> TrackingMsg {
        match effect {
            TrackingEffect::Lookup(tracking_id) => TrackingMsg::Found(
                backend
                    .get_donation(&tracking_id)
                    .await
                    .map_err(ClientError::lookup),
            ),
        }
    }
}
