//! Integration tests for the `contact_submissions` repository.
//!
//! These need a Postgres server reachable through `DATABASE_URL`; run them
//! with `cargo test -p partners-db -- --ignored`.

use assert_matches::assert_matches;
use partners_core::submission::{SubmissionStatus, FORM_TYPE_CONTACT, FORM_TYPE_ONBOARDING};
use partners_db::models::submission::CreateSubmission;
use partners_db::repositories::SubmissionRepo;
use partners_db::{PgSubmissionStore, StoreError, SubmissionStore};
use sqlx::PgPool;

fn new_submission(form_type: &str, email: &str) -> CreateSubmission {
    CreateSubmission {
        form_type: form_type.to_string(),
        name: "Ahmed Ali".to_string(),
        email: email.to_string(),
        phone: Some("+971501234123".to_string()),
        company: Some("Al Manara Trading".to_string()),
        message: "Onboarding application".to_string(),
        form_data: Some(serde_json::json!({ "industry": "retail" })),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_and_find_roundtrip(pool: PgPool) {
    partners_db::health_check(&pool).await.unwrap();

    let created = SubmissionRepo::create(&pool, &new_submission(FORM_TYPE_ONBOARDING, "a@example.com"))
        .await
        .unwrap();
    assert_eq!(created.status, "new");
    assert_eq!(created.form_data.as_ref().unwrap()["industry"], "retail");

    let found = SubmissionRepo::find_by_form_type_and_email(&pool, FORM_TYPE_ONBOARDING, "a@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn unique_index_only_applies_to_onboarding(pool: PgPool) {
    let store = PgSubmissionStore::new(pool.clone());

    store
        .insert(&new_submission(FORM_TYPE_ONBOARDING, "a@example.com"))
        .await
        .unwrap();
    let second = store
        .insert(&new_submission(FORM_TYPE_ONBOARDING, "a@example.com"))
        .await;
    assert_matches!(second, Err(StoreError::Duplicate { .. }));

    store
        .insert(&new_submission(FORM_TYPE_CONTACT, "a@example.com"))
        .await
        .unwrap();
    store
        .insert(&new_submission(FORM_TYPE_CONTACT, "a@example.com"))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_and_update_status(pool: PgPool) {
    let store = PgSubmissionStore::new(pool);
    let contact = store
        .insert(&new_submission(FORM_TYPE_CONTACT, "c@example.com"))
        .await
        .unwrap();
    store
        .insert(&new_submission(FORM_TYPE_ONBOARDING, "o@example.com"))
        .await
        .unwrap();

    let onboarding = store
        .list(Some(FORM_TYPE_ONBOARDING), None, 50, 0)
        .await
        .unwrap();
    assert_eq!(onboarding.len(), 1);

    let updated = store
        .update_status(contact.id, SubmissionStatus::Contacted)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "contacted");
    assert!(updated.updated_at >= contact.updated_at);

    let contacted = store
        .list(None, Some("contacted"), 50, 0)
        .await
        .unwrap();
    assert_eq!(contacted.len(), 1);
}
