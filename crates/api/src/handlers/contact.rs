//! Handler for the general contact form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use partners_core::submission::{ContactRequest, CONTACT_THANK_YOU};
use serde_json::json;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::intake;
use crate::state::AppState;

/// POST /contact -- store a message and alert the operators.
pub async fn submit_contact(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ContactRequest>,
) -> AppResult<impl IntoResponse> {
    let accepted = intake::submit_contact(&state, request).await?;

    let failed = accepted.failed_deliveries();
    if failed > 0 {
        tracing::warn!(
            submission_id = accepted.submission.id,
            failed,
            "Contact message stored but some operator alerts were not delivered",
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": CONTACT_THANK_YOU,
            "submissionId": accepted.submission.id,
        })),
    ))
}
