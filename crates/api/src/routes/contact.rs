//! Route definitions for the `/contact` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Contact routes, merged into the `/api` tree.
pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(contact::submit_contact))
}
