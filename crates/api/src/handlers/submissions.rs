//! Handlers for operator review of stored submissions.
//!
//! All endpoints require the admin role.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use partners_core::error::CoreError;
use partners_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use partners_core::submission::{self, SubmissionStatus};
use partners_core::types::DbId;
use partners_db::models::submission::{Submission, SubmissionListParams, UpdateSubmissionStatus};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

async fn load(state: &AppState, id: DbId) -> AppResult<Submission> {
    state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id,
        }))
}

// ---------------------------------------------------------------------------
// GET /admin/submissions
// ---------------------------------------------------------------------------

/// List submissions newest-first with optional form type and status filters.
pub async fn list_submissions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<SubmissionListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref ft) = params.form_type {
        submission::validate_form_type(ft)?;
    }
    if let Some(ref s) = params.status {
        SubmissionStatus::from_str_db(s)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let rows = state
        .store
        .list(
            params.form_type.as_deref(),
            params.status.as_deref(),
            limit,
            offset,
        )
        .await?;

    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// GET /admin/submissions/{id}
// ---------------------------------------------------------------------------

pub async fn get_submission(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = load(&state, id).await?;
    Ok(Json(DataResponse { data: row }))
}

// ---------------------------------------------------------------------------
// PUT /admin/submissions/{id}/status
// ---------------------------------------------------------------------------

/// Move a submission one step along `new -> contacted -> resolved`.
pub async fn update_submission_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateSubmissionStatus>,
) -> AppResult<impl IntoResponse> {
    let next = SubmissionStatus::from_str_db(&input.status)?;
    let row = load(&state, id).await?;
    let current = SubmissionStatus::from_str_db(&row.status)?;
    submission::validate_transition(current, next)?;

    let updated = state
        .store
        .update_status(id, next)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id,
        }))?;

    tracing::info!(
        submission_id = id,
        from = current.as_str(),
        to = next.as_str(),
        operator = %admin.subject,
        "Submission status updated",
    );

    Ok(Json(DataResponse { data: updated }))
}
