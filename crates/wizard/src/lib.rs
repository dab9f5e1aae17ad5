//! Client-side onboarding wizard.
//!
//! A rendering-agnostic state machine that walks a merchant through four
//! steps, validates each field with the shared rules from `partners_core`,
//! and posts the finished application through a [`SubmissionTransport`].
//!
//! ```text
//! Identity(1) -> Scale(2) -> TerminalSetup(3) -> Contact(4) -> Submitted
//! ```

pub mod client;
pub mod draft;
pub mod machine;
pub mod rules;
pub mod step;

pub use client::{HttpTransport, SubmissionTransport, SubmitError};
pub use draft::{Field, FieldValue, OnboardingDraft};
pub use machine::{SubmissionReceipt, Wizard, WizardError};
pub use rules::validate_field;
pub use step::WizardStep;
