//! crates/thriftlife_client/src/views/intake.rs
//!
//! The donation form.

use async_trait::async_trait;
use thriftlife_core::domain::{ClothingCategory, Donation, NewDonation, TrackingId};
use thriftlife_core::ports::ThriftBackend;
use thriftlife_core::ValidationError;
use tracing::info;

use super::{Notice, Notices, View};
use crate::error::ClientError;

/// Free-text inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    DonorName,
    Email,
    Phone,
    Address,
    City,
    PostalCode,
    PickupDate,
    PickupTime,
    EstimatedWeight,
    SpecialInstructions,
}

#[derive(Debug)]
pub enum IntakeMsg {
    Edit(IntakeField, String),
    ToggleCategory(ClothingCategory),
    Submit,
    Submitted(Result<Donation, ClientError>),
    /// Leaves the confirmation screen for a blank form.
    StartOver,
}

#[derive(Debug)]
pub enum IntakeEffect {
    CreateDonation(NewDonation),
}

#[derive(Debug, Default)]
pub struct IntakeView {
    pub form: NewDonation,
    /// The weight as typed; parsed on submit.
    pub weight_text: String,
    submitting: bool,
    confirmed: Option<TrackingId>,
    pub notices: Notices,
}

impl IntakeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The submit control is disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The tracking identifier issued for the last successful submission.
    pub fn confirmation(&self) -> Option<&TrackingId> {
        self.confirmed.as_ref()
    }

    fn edit(&mut self, field: IntakeField, value: String) {
        let form = &mut self.form;
        match field {
            IntakeField::DonorName => form.donor_name = value,
            IntakeField::Email => form.email = value,
            IntakeField::Phone => form.phone = value,
            IntakeField::Address => form.address = value,
            IntakeField::City => form.city = value,
            IntakeField::PostalCode => form.postal_code = value,
            IntakeField::PickupDate => form.pickup_date = value,
            IntakeField::PickupTime => form.pickup_time = value,
            IntakeField::EstimatedWeight => self.weight_text = value,
            IntakeField::SpecialInstructions => {
                form.special_instructions = Some(value).filter(|v| !v.trim().is_empty())
            }
        }
    }

    fn toggle(&mut self, category: ClothingCategory) {
        let categories = &mut self.form.categories;
        match categories.iter().position(|c| *c == category) {
            Some(at) => {
                categories.remove(at);
            }
            None => categories.push(category),
        }
    }

    /// The request body, or the first problem with the form.
    fn request(&self) -> Result<NewDonation, ValidationError> {
        let mut request = self.form.clone();
        let weight = self.weight_text.trim();
        request.estimated_weight = if weight.is_empty() {
            None
        } else {
            Some(
                weight
                    .parse::<f64>()
                    .map_err(|_| ValidationError::InvalidNumber("estimated weight"))?,
            )
        };
        request.validate()?;
        Ok(request)
    }
}

#[async_trait]
impl View for IntakeView {
    type Msg = IntakeMsg;
    type Effect = IntakeEffect;

    fn update(&mut self, msg: IntakeMsg) -> Option<IntakeEffect> {
        match msg {
            IntakeMsg::Edit(field, value) => self.edit(field, value),
            IntakeMsg::ToggleCategory(category) => self.toggle(category),
            IntakeMsg::Submit if self.submitting => {}
            IntakeMsg::Submit => match self.request() {
                Ok(request) => {
                    self.submitting = true;
                    return Some(IntakeEffect::CreateDonation(request));
                }
                Err(e) => self.notices.fail(&ClientError::from(e)),
            },
            IntakeMsg::Submitted(outcome) => {
                self.submitting = false;
                match outcome {
                    Ok(donation) => {
                        info!("Donation scheduled as {}", donation.tracking_id);
                        self.confirmed = Some(donation.tracking_id);
                        self.notices
                            .push(Notice::success("Donation request submitted successfully!"));
                    }
                    Err(e) => self.notices.fail(&e),
                }
            }
            IntakeMsg::StartOver => {
                self.form = NewDonation::default();
                self.weight_text.clear();
                self.confirmed = None;
            }
        }
        None
    }

    async fn run(backend: &dyn ThriftBackend, effect: IntakeEffect) -> IntakeMsg {
        match effect {
            IntakeEffect::CreateDonation(request) => IntakeMsg::Submitted(
                backend
                    .create_donation(&request)
                    .await
                    .map_err(|e| ClientError::Submission(e.to_string())),
            ),
        }
    }
}
