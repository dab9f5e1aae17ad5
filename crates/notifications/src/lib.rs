//! Outbound email for website submissions.
//!
//! - [`email`]: the [`Mailer`] seam, SMTP delivery via `lettre`, and the
//!   disabled fallback used when SMTP is not configured.
//! - [`templates`]: operator alerts and submitter confirmations.
//! - [`dispatch`]: best-effort sequential delivery with per-recipient outcomes.

pub mod dispatch;
pub mod email;
pub mod templates;

pub use dispatch::{dispatch, DeliveryOutcome, NotificationKind, PendingEmail};
pub use email::{DisabledMailer, EmailConfig, EmailError, Mailer, OutgoingEmail, SmtpMailer};
