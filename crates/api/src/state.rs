use std::sync::Arc;

use partners_db::SubmissionStore;
use partners_notifications::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every field is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Submission persistence (Postgres in production, in-memory in tests).
    pub store: Arc<dyn SubmissionStore>,
    /// Outbound email.
    pub mailer: Arc<dyn Mailer>,
    /// Server configuration, including operator addresses and JWT settings.
    pub config: Arc<ServerConfig>,
}
