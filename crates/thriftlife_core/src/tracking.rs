//! crates/thriftlife_core/src/tracking.rs
//!
//! The donation progress timeline shown on the tracking page.
//!
//! A donation moves `Scheduled -> Picked Up -> Processed -> Completed`. The timeline
//! always renders all four stages; a stage is completed when it is at or before the
//! donation's current status.

use serde::Serialize;

use crate::domain::{Donation, DonationStatus};

/// One stage of the rendered progress timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub stage: DonationStatus,
    pub completed: bool,
    pub current: bool,
}

/// Builds the timeline for a status. `None` stands for a status the client did
/// not recognise, which renders every stage as pending.
pub fn compute_timeline(status: Option<DonationStatus>) -> Vec<TimelineStep> {
    let current = status.map(|s| s.index());
    DonationStatus::PROGRESSION
        .iter()
        .map(|&stage| {
            let index = stage.index();
            TimelineStep {
                stage,
                completed: current.is_some_and(|c| index <= c),
                current: current == Some(index),
            }
        })
        .collect()
}

/// Timeline for a fetched donation.
pub fn timeline_for(donation: &Donation) -> Vec<TimelineStep> {
    compute_timeline(Some(donation.status))
}

/// Timeline for a raw status label, as received from an older or newer backend.
pub fn timeline_for_label(label: &str) -> Vec<TimelineStep> {
    compute_timeline(label.parse().ok())
}

/// Short description shown next to the current status.
pub fn status_description(status: Option<DonationStatus>) -> &'static str {
    match status {
        Some(DonationStatus::Scheduled) => "Your donation pickup has been scheduled",
        Some(DonationStatus::PickedUp) => "Your clothes have been collected by our team",
        Some(DonationStatus::Processed) => {
            "Items are being sorted and prepared for reuse or recycling"
        }
        Some(DonationStatus::Completed) => "Your donation has been successfully processed!",
        None => "Status unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_stages_are_those_at_or_before_the_current_status() {
        for status in DonationStatus::PROGRESSION {
            let timeline = compute_timeline(Some(status));
            assert_eq!(timeline.len(), 4);
            for (i, step) in timeline.iter().enumerate() {
                assert_eq!(step.stage.index(), i);
                assert_eq!(step.completed, i <= status.index());
                assert_eq!(step.current, i == status.index());
            }
            assert_eq!(timeline.iter().filter(|s| s.current).count(), 1);
        }
    }

    #[test]
    fn unknown_status_marks_nothing() {
        let timeline = timeline_for_label("Lost In Transit");
        assert_eq!(timeline.len(), 4);
        assert!(timeline.iter().all(|s| !s.completed && !s.current));
        assert_eq!(status_description(None), "Status unknown");
    }

    #[test]
    fn picked_up_label_is_recognised() {
        let timeline = timeline_for_label("Picked Up");
        let flags: Vec<_> = timeline.iter().map(|s| (s.completed, s.current)).collect();
        assert_eq!(
            flags,
            vec![(true, false), (true, true), (false, false), (false, false)]
        );
    }
}
