//! Handlers for the merchant onboarding endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use partners_core::onboarding::{
    Emirate, Industry, MAX_LOCATION_COUNT, MIN_LOCATION_COUNT, TERMINAL_MID_LENGTH,
};
use partners_core::submission::{OnboardingAccepted, OnboardingRequest};
use serde_json::json;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::intake;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /onboarding
// ---------------------------------------------------------------------------

/// Accept a merchant application.
///
/// Responds 400 on schema or terminal-MID failures, 409 when the email has
/// already applied, and 200 once the row is stored, whatever happened to
/// the notification emails.
pub async fn submit_onboarding(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<OnboardingRequest>,
) -> AppResult<impl IntoResponse> {
    let accepted = intake::submit_onboarding(&state, request).await?;

    let failed = accepted.failed_deliveries();
    if failed > 0 {
        tracing::warn!(
            submission_id = accepted.submission.id,
            failed,
            attempted = accepted.deliveries.len(),
            "Onboarding stored but some notifications were not delivered",
        );
    }

    Ok(Json(OnboardingAccepted::new(accepted.submission.id)))
}

// ---------------------------------------------------------------------------
// GET /onboarding
// ---------------------------------------------------------------------------

/// Static description of the onboarding endpoint for integrators.
pub async fn describe_onboarding() -> impl IntoResponse {
    let industries: Vec<_> = Industry::ALL
        .iter()
        .map(|i| json!({ "value": i.as_str(), "label": i.label() }))
        .collect();
    let emirates: Vec<_> = Emirate::ALL
        .iter()
        .map(|e| json!({ "value": e.as_str(), "label": e.label() }))
        .collect();

    Json(json!({
        "endpoint": "/api/onboarding",
        "methods": ["GET", "POST"],
        "description": "Submit a Partners Points merchant onboarding application",
        "requiredFields": [
            "name", "businessName", "industry", "locationCount", "selectedEmirates",
            "monthlyCustomers", "hasRfmTerminal", "email", "phone", "designation",
            "acceptedTerms"
        ],
        "optionalFields": ["terminalDetails"],
        "constraints": {
            "locationCount": { "min": MIN_LOCATION_COUNT, "max": MAX_LOCATION_COUNT },
            "terminalDetails": format!(
                "Required when hasRfmTerminal is true; exactly {TERMINAL_MID_LENGTH} digits"
            ),
            "acceptedTerms": "Must be true",
        },
        "industries": industries,
        "emirates": emirates,
    }))
}
