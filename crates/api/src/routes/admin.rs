//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::submissions;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /submissions               -> list_submissions
/// GET    /submissions/{id}          -> get_submission
/// PUT    /submissions/{id}/status   -> update_submission_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submissions", get(submissions::list_submissions))
        .route("/submissions/{id}", get(submissions::get_submission))
        .route(
            "/submissions/{id}/status",
            put(submissions::update_submission_status),
        )
}
