//! Storage seam for submissions.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use partners_core::submission::{SubmissionStatus, FORM_TYPE_ONBOARDING};
use partners_core::types::DbId;
use tokio::sync::Mutex;

use crate::models::submission::{CreateSubmission, Submission};
use crate::repositories::submission_repo::ONBOARDING_EMAIL_CONSTRAINT;
use crate::repositories::SubmissionRepo;
use crate::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An onboarding row already exists for this email.
    #[error("Duplicate {form_type} submission for {email}")]
    Duplicate { form_type: String, email: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Backend-agnostic access to the `contact_submissions` table.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// First submission of `form_type` sent from `email`, if any.
    async fn find_one(
        &self,
        form_type: &str,
        email: &str,
    ) -> Result<Option<Submission>, StoreError>;

    /// Insert a row with status `new`.
    ///
    /// Fails with [`StoreError::Duplicate`] when a second onboarding row
    /// would be created for the same email.
    async fn insert(&self, input: &CreateSubmission) -> Result<Submission, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Submission>, StoreError>;

    /// Newest-first listing with optional filters.
    async fn list(
        &self,
        form_type: Option<&str>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, StoreError>;

    async fn update_status(
        &self,
        id: DbId,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>, StoreError>;
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

pub struct PgSubmissionStore {
    pool: DbPool,
}

impl PgSubmissionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Turn a violation of the onboarding unique index into [`StoreError::Duplicate`].
fn map_insert_error(err: sqlx::Error, input: &CreateSubmission) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(ONBOARDING_EMAIL_CONSTRAINT)
        {
            return StoreError::Duplicate {
                form_type: input.form_type.clone(),
                email: input.email.clone(),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn find_one(
        &self,
        form_type: &str,
        email: &str,
    ) -> Result<Option<Submission>, StoreError> {
        Ok(SubmissionRepo::find_by_form_type_and_email(&self.pool, form_type, email).await?)
    }

    async fn insert(&self, input: &CreateSubmission) -> Result<Submission, StoreError> {
        SubmissionRepo::create(&self.pool, input)
            .await
            .map_err(|e| map_insert_error(e, input))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Submission>, StoreError> {
        Ok(SubmissionRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list(
        &self,
        form_type: Option<&str>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, StoreError> {
        Ok(SubmissionRepo::list_filtered(&self.pool, form_type, status, limit, offset).await?)
    }

    async fn update_status(
        &self,
        id: DbId,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>, StoreError> {
        Ok(SubmissionRepo::update_status(&self.pool, id, status.as_str()).await?)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local store with the same uniqueness rule as the Postgres index.
///
/// Backs the API test suite, which needs no database.
#[derive(Default)]
pub struct InMemorySubmissionStore {
    rows: Mutex<Vec<Submission>>,
    unavailable: AtomicBool,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of rows currently held.
    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    async fn find_one(
        &self,
        form_type: &str,
        email: &str,
    ) -> Result<Option<Submission>, StoreError> {
        self.check_available()?;
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .find(|r| r.form_type == form_type && r.email == email)
            .cloned())
    }

    async fn insert(&self, input: &CreateSubmission) -> Result<Submission, StoreError> {
        self.check_available()?;
        let mut rows = self.rows.lock().await;

        if input.form_type == FORM_TYPE_ONBOARDING
            && rows
                .iter()
                .any(|r| r.form_type == FORM_TYPE_ONBOARDING && r.email == input.email)
        {
            return Err(StoreError::Duplicate {
                form_type: input.form_type.clone(),
                email: input.email.clone(),
            });
        }

        let now = chrono::Utc::now();
        let row = Submission {
            id: rows.len() as DbId + 1,
            form_type: input.form_type.clone(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            company: input.company.clone(),
            message: input.message.clone(),
            form_data: input.form_data.clone(),
            status: SubmissionStatus::New.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Submission>, StoreError> {
        self.check_available()?;
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn list(
        &self,
        form_type: Option<&str>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, StoreError> {
        self.check_available()?;
        let rows = self.rows.lock().await;
        // Ids are assigned in insertion order, so reverse id order is newest-first.
        Ok(rows
            .iter()
            .rev()
            .filter(|r| form_type.map_or(true, |ft| r.form_type == ft))
            .filter(|r| status.map_or(true, |s| r.status == s))
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: DbId,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>, StoreError> {
        self.check_available()?;
        let mut rows = self.rows.lock().await;
        Ok(rows.iter_mut().find(|r| r.id == id).map(|row| {
            row.status = status.as_str().to_string();
            row.updated_at = chrono::Utc::now();
            row.clone()
        }))
    }
}
