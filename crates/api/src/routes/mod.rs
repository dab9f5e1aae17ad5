pub mod admin;
pub mod contact;
pub mod health;
pub mod onboarding;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /onboarding                          submit (POST), describe (GET)
/// /contact                             submit (POST)
///
/// /admin/submissions                   list (admin only)
/// /admin/submissions/{id}              get
/// /admin/submissions/{id}/status       update status (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(onboarding::router())
        .merge(contact::router())
        .nest("/admin", admin::router())
}
