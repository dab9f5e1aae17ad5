//! The onboarding wizard state machine.
//!
//! [`Wizard`] owns the draft, the per-field error map and the current step.
//! It has no rendering concerns: a UI forwards input events to it and reads
//! back `step()`, `errors()` and `is_submitting()` to draw itself.

use std::collections::BTreeMap;

use partners_core::submission::{OnboardingAccepted, OnboardingRequest};
use partners_core::types::DbId;

use crate::client::{SubmissionTransport, SubmitError};
use crate::draft::{Field, FieldValue, OnboardingDraft};
use crate::rules;
use crate::step::WizardStep;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Field {field:?} does not accept a {got} value")]
    TypeMismatch { field: Field, got: &'static str },

    #[error("A submission is already in progress")]
    InFlight,

    #[error("The application has already been submitted")]
    AlreadySubmitted,

    #[error("No submission is in progress")]
    NotInFlight,

    #[error("Submission is only possible from the {} step", WizardStep::Contact.label())]
    NotOnFinalStep,

    #[error("Please correct the highlighted fields")]
    StepInvalid,

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// What the server handed back for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub message: String,
    pub submission_id: DbId,
    pub next_steps: Vec<String>,
}

impl From<OnboardingAccepted> for SubmissionReceipt {
    fn from(accepted: OnboardingAccepted) -> Self {
        Self {
            message: accepted.message,
            submission_id: accepted.submission_id,
            next_steps: accepted.next_steps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Position {
    Step(WizardStep),
    Submitted(SubmissionReceipt),
}

#[derive(Debug, Clone)]
pub struct Wizard {
    position: Position,
    draft: OnboardingDraft,
    errors: BTreeMap<Field, String>,
    in_flight: bool,
    last_error: Option<String>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            position: Position::Step(WizardStep::Identity),
            draft: OnboardingDraft::default(),
            errors: BTreeMap::new(),
            in_flight: false,
            last_error: None,
        }
    }

    // -- accessors ----------------------------------------------------------

    /// Current step, or `None` once submitted.
    pub fn step(&self) -> Option<WizardStep> {
        match self.position {
            Position::Step(step) => Some(step),
            Position::Submitted(_) => None,
        }
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        match &self.position {
            Position::Submitted(receipt) => Some(receipt),
            Position::Step(_) => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.position, Position::Submitted(_))
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn draft(&self) -> &OnboardingDraft {
        &self.draft
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Message from the most recent failed submission attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // -- field events -------------------------------------------------------

    /// Store a new value and clear that field's error. No validation runs.
    pub fn update_field(&mut self, field: Field, value: FieldValue) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.draft.apply(field, value)?;
        self.errors.remove(&field);
        Ok(())
    }

    /// Evaluate one rule against the draft without touching any state.
    pub fn validate_field(&self, field: Field) -> Option<&'static str> {
        rules::validate_field(&self.draft, field)
    }

    /// Store or clear `field`'s error after the user leaves it.
    pub fn blur_field(&mut self, field: Field) {
        match self.validate_field(field) {
            Some(message) => {
                self.errors.insert(field, message.to_string());
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Check every field on `step`, replacing that step's errors with the
    /// full set of failures.
    pub fn validate_step(&mut self, step: WizardStep) -> bool {
        let mut valid = true;
        for &field in step.fields() {
            self.errors.remove(&field);
            if let Some(message) = rules::validate_field(&self.draft, field) {
                self.errors.insert(field, message.to_string());
                valid = false;
            }
        }
        valid
    }

    // -- navigation ---------------------------------------------------------

    /// Advance one step if the current one validates. Returns whether the
    /// wizard moved.
    pub fn next_step(&mut self) -> bool {
        let Position::Step(current) = self.position else {
            return false;
        };
        if self.in_flight || !self.validate_step(current) {
            return false;
        }
        match current.next() {
            Some(next) => {
                self.position = Position::Step(next);
                tracing::debug!(step = next.to_number(), "Wizard advanced");
                true
            }
            None => false,
        }
    }

    /// Go back one step. Never validates. Returns whether the wizard moved.
    pub fn prev_step(&mut self) -> bool {
        let Position::Step(current) = self.position else {
            return false;
        };
        if self.in_flight {
            return false;
        }
        match current.prev() {
            Some(prev) => {
                self.position = Position::Step(prev);
                true
            }
            None => false,
        }
    }

    // -- submission ---------------------------------------------------------

    /// Validate the final step and mark a submission as in flight.
    ///
    /// On success the returned payload must be sent and its result passed
    /// to [`Wizard::finish_submit`].
    pub fn begin_submit(&mut self) -> Result<OnboardingRequest, WizardError> {
        let current = match self.position {
            Position::Submitted(_) => return Err(WizardError::AlreadySubmitted),
            Position::Step(step) => step,
        };
        if self.in_flight {
            return Err(WizardError::InFlight);
        }
        if current != WizardStep::Contact {
            return Err(WizardError::NotOnFinalStep);
        }
        if !self.validate_step(WizardStep::Contact) {
            return Err(WizardError::StepInvalid);
        }

        self.in_flight = true;
        self.last_error = None;
        Ok(self.draft.to_request())
    }

    /// Record the outcome of the submission started by [`Wizard::begin_submit`].
    ///
    /// On failure the step and every field value stay as they were, so the
    /// user can correct and retry.
    pub fn finish_submit(
        &mut self,
        result: Result<OnboardingAccepted, SubmitError>,
    ) -> Result<SubmissionReceipt, WizardError> {
        if !self.in_flight {
            return Err(WizardError::NotInFlight);
        }
        self.in_flight = false;

        match result {
            Ok(accepted) => {
                tracing::info!(submission_id = accepted.submission_id, "Onboarding application accepted");
                let receipt = SubmissionReceipt::from(accepted);
                self.errors.clear();
                self.position = Position::Submitted(receipt.clone());
                Ok(receipt)
            }
            Err(err) => {
                if let SubmitError::Rejected { details, .. } = &err {
                    for (key, messages) in details {
                        if let (Some(field), Some(message)) = (Field::from_key(key), messages.first()) {
                            self.errors.insert(field, message.clone());
                        }
                    }
                }
                tracing::warn!(error = %err, "Onboarding submission failed");
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Validate, send through `transport`, and record the outcome.
    pub async fn submit(
        &mut self,
        transport: &dyn SubmissionTransport,
    ) -> Result<SubmissionReceipt, WizardError> {
        let request = self.begin_submit()?;
        let result = transport.submit(&request).await;
        self.finish_submit(result)
    }

    /// Start over on step 1 with an empty draft.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.is_submitted() {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.in_flight {
            return Err(WizardError::InFlight);
        }
        Ok(())
    }
}
