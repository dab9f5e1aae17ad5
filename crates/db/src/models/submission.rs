//! Website form submission model and DTOs.

use partners_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contact_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: DbId,
    pub form_type: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub form_data: Option<serde_json::Value>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new submission. Status always starts at `new`.
#[derive(Debug, Clone)]
pub struct CreateSubmission {
    pub form_type: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub form_data: Option<serde_json::Value>,
}

/// DTO for moving a submission through the review workflow.
#[derive(Debug, Deserialize)]
pub struct UpdateSubmissionStatus {
    pub status: String,
}

/// Query parameters for listing submissions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionListParams {
    pub form_type: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
