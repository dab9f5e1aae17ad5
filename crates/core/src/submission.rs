//! Submission DTOs, schema validation, and status rules.
//!
//! Every website form lands in the same `contact_submissions` table and is
//! told apart by its `form_type`. This module defines the request bodies the
//! server accepts for each form, the server-side schema they are checked
//! against, the summary text and structured `form_data` stored with an
//! onboarding row, and the operator status workflow.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::onboarding::{self, Emirate, Industry};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Form types
// ---------------------------------------------------------------------------

/// Merchant signup submitted through the onboarding wizard.
pub const FORM_TYPE_ONBOARDING: &str = "onboarding";
/// Generic "get in touch" form.
pub const FORM_TYPE_CONTACT: &str = "contact";

pub const VALID_FORM_TYPES: &[&str] = &[FORM_TYPE_ONBOARDING, FORM_TYPE_CONTACT];

pub fn validate_form_type(form_type: &str) -> Result<(), CoreError> {
    if VALID_FORM_TYPES.contains(&form_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid form type '{form_type}'. Must be one of: {VALID_FORM_TYPES:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// User-facing text
// ---------------------------------------------------------------------------

pub const ONBOARDING_THANK_YOU: &str = "Thank you for applying to Partners Points! \
     Our team will review your application and get back to you within 24-48 hours.";

pub const ONBOARDING_DUPLICATE: &str = "An onboarding application has already been submitted \
     with this email address. Please contact support if you need to update it.";

pub const ONBOARDING_TERMINAL_REQUIRED: &str =
    "Terminal MID must be exactly 9 digits when you have an RFM terminal";

pub const CONTACT_THANK_YOU: &str =
    "Thank you for reaching out! Our team will get back to you shortly.";

/// What happens after an application is accepted, in order.
pub const NEXT_STEPS: [&str; 4] = [
    "Our team reviews your application within 24 hours",
    "A partnership manager contacts you to discuss your loyalty program",
    "We set up Partners Points on your RFM terminal",
    "Your loyalty program goes live and starts rewarding customers",
];

// ---------------------------------------------------------------------------
// Status workflow
// ---------------------------------------------------------------------------

/// Operator-facing lifecycle of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    New,
    Contacted,
    Resolved,
}

impl SubmissionStatus {
    /// Parse a status string from the database or a request.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "resolved" => Ok(Self::Resolved),
            _ => Err(CoreError::Validation(format!(
                "Invalid submission status '{s}'. Must be one of: new, contacted, resolved"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Resolved => "resolved",
        }
    }

    /// Statuses reachable from `self`. The workflow only moves forward.
    pub fn valid_transitions(&self) -> &'static [SubmissionStatus] {
        match self {
            Self::New => &[Self::Contacted],
            Self::Contacted => &[Self::Resolved],
            Self::Resolved => &[],
        }
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: SubmissionStatus, next: SubmissionStatus) -> Result<(), CoreError> {
    if current.valid_transitions().contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot move submission from '{}' to '{}'",
            current.as_str(),
            next.as_str()
        )))
    }
}

// ---------------------------------------------------------------------------
// Onboarding request
// ---------------------------------------------------------------------------

/// Body of `POST /api/onboarding`.
///
/// The schema here is deliberately looser than the wizard's rules in a few
/// places (phone only needs 9 characters, emirates are not checked against
/// the enum) and is the authoritative server-side check. The terminal MID
/// rule spans two fields and is applied separately by
/// [`validate_terminal_details`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 2, message = "Business name must be at least 2 characters"))]
    pub business_name: String,

    #[validate(length(min = 1, message = "Industry is required"))]
    pub industry: String,

    #[validate(range(min = 1, max = 50, message = "Number of locations must be between 1 and 50"))]
    pub location_count: i64,

    #[validate(length(min = 1, message = "Select at least one emirate"))]
    pub selected_emirates: Vec<String>,

    pub monthly_customers: Vec<f64>,

    pub has_rfm_terminal: bool,

    #[serde(default)]
    pub terminal_details: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 9, message = "Phone number must be at least 9 characters"))]
    pub phone: String,

    #[validate(length(min = 2, message = "Designation must be at least 2 characters"))]
    pub designation: String,

    #[validate(custom(function = "require_true", message = "You must accept the terms and conditions"))]
    pub accepted_terms: bool,
}

fn require_true(value: &bool) -> Result<(), ValidationError> {
    if *value {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_true"))
    }
}

impl OnboardingRequest {
    /// Run the schema validation, reporting every failing field.
    pub fn validate_schema(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::from_validation_errors("Invalid onboarding data", &e))
    }

    /// Human-readable summary stored in the `message` column.
    pub fn summary_message(&self) -> String {
        let emirates = self
            .selected_emirates
            .iter()
            .map(|e| Emirate::parse(e).map(Emirate::label).unwrap_or(e.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        let industry = Industry::parse(&self.industry)
            .map(Industry::label)
            .unwrap_or(self.industry.as_str());

        format!(
            "Onboarding application from {} at {}. Industry: {}. Emirates: {}. Locations: {}.",
            self.designation.trim(),
            self.business_name.trim(),
            industry,
            emirates,
            self.location_count
        )
    }

    /// Structured copy of the application stored in the `form_data` column.
    pub fn form_data(&self, submitted_at: Timestamp) -> serde_json::Value {
        json!({
            "industry": self.industry,
            "locationCount": self.location_count,
            "selectedEmirates": self.selected_emirates,
            "monthlyCustomers": self.monthly_customers,
            "hasRfmTerminal": self.has_rfm_terminal,
            "terminalDetails": self.terminal_details,
            "designation": self.designation,
            "acceptedTerms": self.accepted_terms,
            "submittedAt": submitted_at.to_rfc3339(),
        })
    }
}

/// Cross-field rule: a merchant with an RFM terminal must supply its MID.
pub fn validate_terminal_details(request: &OnboardingRequest) -> Result<(), CoreError> {
    if onboarding::terminal_details_satisfied(
        request.has_rfm_terminal,
        request.terminal_details.as_deref(),
    ) {
        Ok(())
    } else {
        Err(CoreError::InvalidFields {
            message: ONBOARDING_TERMINAL_REQUIRED.to_string(),
            details: [(
                "terminalDetails".to_string(),
                vec![ONBOARDING_TERMINAL_REQUIRED.to_string()],
            )]
            .into_iter()
            .collect(),
        })
    }
}

/// Body of a successful `POST /api/onboarding` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingAccepted {
    pub success: bool,
    pub message: String,
    pub submission_id: DbId,
    pub next_steps: Vec<String>,
}

impl OnboardingAccepted {
    pub fn new(submission_id: DbId) -> Self {
        Self {
            success: true,
            message: ONBOARDING_THANK_YOU.to_string(),
            submission_id,
            next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Contact request
// ---------------------------------------------------------------------------

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl ContactRequest {
    pub fn validate_schema(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::from_validation_errors("Invalid contact data", &e))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
