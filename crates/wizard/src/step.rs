//! Wizard step definitions.

use serde::{Deserialize, Serialize};

use partners_core::error::CoreError;

use crate::draft::Field;

/// The four data-entry steps of the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Identity,
    Scale,
    TerminalSetup,
    Contact,
}

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 4;

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Identity,
        WizardStep::Scale,
        WizardStep::TerminalSetup,
        WizardStep::Contact,
    ];

    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Identity),
            2 => Ok(Self::Scale),
            3 => Ok(Self::TerminalSetup),
            4 => Ok(Self::Contact),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::Scale => 2,
            Self::TerminalSetup => 3,
            Self::Contact => 4,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Identity => "Your Business",
            Self::Scale => "Locations & Customers",
            Self::TerminalSetup => "Terminal Setup",
            Self::Contact => "Contact Details",
        }
    }

    /// Fields collected on this step, in display order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Identity => &[Field::Name, Field::BusinessName, Field::Industry],
            Self::Scale => &[
                Field::LocationCount,
                Field::SelectedEmirates,
                Field::MonthlyCustomers,
            ],
            Self::TerminalSetup => &[Field::HasRfmTerminal, Field::TerminalDetails],
            Self::Contact => &[
                Field::Email,
                Field::Phone,
                Field::Designation,
                Field::AcceptedTerms,
            ],
        }
    }

    /// The following step, or `None` on the last one.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.to_number() + 1).ok()
    }

    /// The preceding step, or `None` on the first one.
    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.to_number() - 1).ok()
    }
}
