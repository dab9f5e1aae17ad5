//! Partners Points domain layer.
//!
//! Holds everything both sides of the onboarding pipeline agree on: the
//! enumerated field values, the per-field rules, the submission DTOs with
//! their schema validation, status transitions, and [`error::CoreError`].
//! No I/O happens in this crate.

pub mod error;
pub mod onboarding;
pub mod pagination;
pub mod submission;
pub mod types;
