//! Route definitions for the `/onboarding` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding routes, merged into the `/api` tree.
///
/// ```text
/// GET    /onboarding    -> describe_onboarding
/// POST   /onboarding    -> submit_onboarding
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/onboarding",
        get(onboarding::describe_onboarding).post(onboarding::submit_onboarding),
    )
}
