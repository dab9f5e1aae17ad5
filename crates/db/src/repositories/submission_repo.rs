//! Repository for the `contact_submissions` table.

use partners_core::types::DbId;
use sqlx::PgPool;

use crate::models::submission::{CreateSubmission, Submission};

/// Column list for `contact_submissions` queries.
const COLUMNS: &str = "\
    id, form_type, name, email, phone, company, message, \
    form_data, status, created_at, updated_at";

/// Name of the partial unique index guarding one onboarding row per email.
pub const ONBOARDING_EMAIL_CONSTRAINT: &str = "uq_contact_submissions_onboarding_email";

/// Provides CRUD operations for website form submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a new submission, returning the full row.
    pub async fn create(pool: &PgPool, input: &CreateSubmission) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_submissions \
                (form_type, name, email, phone, company, message, form_data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(&input.form_type)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.company)
            .bind(&input.message)
            .bind(&input.form_data)
            .fetch_one(pool)
            .await
    }

    /// Find the first submission of `form_type` sent from `email`.
    pub async fn find_by_form_type_and_email(
        pool: &PgPool,
        form_type: &str,
        email: &str,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_submissions \
             WHERE form_type = $1 AND email = $2 \
             ORDER BY id ASC LIMIT 1"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(form_type)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a submission by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List submissions with optional filters for form type and status.
    ///
    /// Results are ordered newest-first.
    pub async fn list_filtered(
        pool: &PgPool,
        form_type: Option<&str>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if form_type.is_some() {
            conditions.push(format!("form_type = ${param_idx}"));
            param_idx += 1;
        }
        if status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM contact_submissions {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Submission>(&query);

        if let Some(ft) = form_type {
            q = q.bind(ft);
        }
        if let Some(s) = status {
            q = q.bind(s);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Update the status of a submission. Returns the updated row if found.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_submissions SET status = $1 WHERE id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(new_status)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
