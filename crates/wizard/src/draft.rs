//! The in-progress application held by the wizard.

use std::collections::BTreeSet;

use partners_core::onboarding::{Emirate, DEFAULT_MONTHLY_CUSTOMERS, MIN_LOCATION_COUNT};
use partners_core::submission::OnboardingRequest;
use serde::{Deserialize, Serialize};

use crate::machine::WizardError;
use crate::step::WizardStep;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// Every input the wizard collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    BusinessName,
    Industry,
    LocationCount,
    SelectedEmirates,
    MonthlyCustomers,
    HasRfmTerminal,
    TerminalDetails,
    Email,
    Phone,
    Designation,
    AcceptedTerms,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Name,
        Field::BusinessName,
        Field::Industry,
        Field::LocationCount,
        Field::SelectedEmirates,
        Field::MonthlyCustomers,
        Field::HasRfmTerminal,
        Field::TerminalDetails,
        Field::Email,
        Field::Phone,
        Field::Designation,
        Field::AcceptedTerms,
    ];

    /// Wire name, as used in the request payload and server error details.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::BusinessName => "businessName",
            Self::Industry => "industry",
            Self::LocationCount => "locationCount",
            Self::SelectedEmirates => "selectedEmirates",
            Self::MonthlyCustomers => "monthlyCustomers",
            Self::HasRfmTerminal => "hasRfmTerminal",
            Self::TerminalDetails => "terminalDetails",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Designation => "designation",
            Self::AcceptedTerms => "acceptedTerms",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// The step on which this field is entered.
    pub fn step(self) -> WizardStep {
        match self {
            Self::Name | Self::BusinessName | Self::Industry => WizardStep::Identity,
            Self::LocationCount | Self::SelectedEmirates | Self::MonthlyCustomers => WizardStep::Scale,
            Self::HasRfmTerminal | Self::TerminalDetails => WizardStep::TerminalSetup,
            Self::Email | Self::Phone | Self::Designation | Self::AcceptedTerms => WizardStep::Contact,
        }
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A new value for one field, as produced by an input control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Count(u32),
    Emirates(BTreeSet<Emirate>),
    Counts(Vec<u32>),
    Flag(bool),
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Count(_) => "count",
            Self::Emirates(_) => "emirates",
            Self::Counts(_) => "counts",
            Self::Flag(_) => "flag",
        }
    }
}

// ---------------------------------------------------------------------------
// OnboardingDraft
// ---------------------------------------------------------------------------

/// Everything the merchant has entered so far. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingDraft {
    pub name: String,
    pub business_name: String,
    /// Wire value of the selected industry; empty until one is picked.
    pub industry: String,
    pub location_count: u32,
    pub selected_emirates: BTreeSet<Emirate>,
    pub monthly_customers: Vec<u32>,
    pub has_rfm_terminal: bool,
    pub terminal_details: String,
    pub email: String,
    pub phone: String,
    pub designation: String,
    pub accepted_terms: bool,
}

impl Default for OnboardingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            business_name: String::new(),
            industry: String::new(),
            location_count: MIN_LOCATION_COUNT,
            selected_emirates: BTreeSet::new(),
            monthly_customers: vec![DEFAULT_MONTHLY_CUSTOMERS],
            has_rfm_terminal: false,
            terminal_details: String::new(),
            email: String::new(),
            phone: String::new(),
            designation: String::new(),
            accepted_terms: false,
        }
    }
}

impl OnboardingDraft {
    /// Store `value` in `field`. The value's shape must match the field.
    pub fn apply(&mut self, field: Field, value: FieldValue) -> Result<(), WizardError> {
        match (field, value) {
            (Field::Name, FieldValue::Text(v)) => self.name = v,
            (Field::BusinessName, FieldValue::Text(v)) => self.business_name = v,
            (Field::Industry, FieldValue::Text(v)) => self.industry = v,
            (Field::TerminalDetails, FieldValue::Text(v)) => self.terminal_details = v,
            (Field::Email, FieldValue::Text(v)) => self.email = v,
            (Field::Phone, FieldValue::Text(v)) => self.phone = v,
            (Field::Designation, FieldValue::Text(v)) => self.designation = v,
            (Field::LocationCount, FieldValue::Count(v)) => self.location_count = v,
            (Field::SelectedEmirates, FieldValue::Emirates(v)) => self.selected_emirates = v,
            (Field::MonthlyCustomers, FieldValue::Counts(v)) => self.monthly_customers = v,
            (Field::HasRfmTerminal, FieldValue::Flag(v)) => self.has_rfm_terminal = v,
            (Field::AcceptedTerms, FieldValue::Flag(v)) => self.accepted_terms = v,
            (field, value) => {
                return Err(WizardError::TypeMismatch {
                    field,
                    got: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// Build the `POST /api/onboarding` body.
    ///
    /// Text is trimmed. Terminal details are only sent when the merchant
    /// has an RFM terminal.
    pub fn to_request(&self) -> OnboardingRequest {
        OnboardingRequest {
            name: self.name.trim().to_string(),
            business_name: self.business_name.trim().to_string(),
            industry: self.industry.clone(),
            location_count: i64::from(self.location_count),
            selected_emirates: self
                .selected_emirates
                .iter()
                .map(|e| e.as_str().to_string())
                .collect(),
            monthly_customers: self.monthly_customers.iter().map(|&c| f64::from(c)).collect(),
            has_rfm_terminal: self.has_rfm_terminal,
            terminal_details: self
                .has_rfm_terminal
                .then(|| self.terminal_details.trim().to_string()),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            designation: self.designation.trim().to_string(),
            accepted_terms: self.accepted_terms,
        }
    }
}
