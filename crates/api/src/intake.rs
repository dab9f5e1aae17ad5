//! Submission intake pipeline.
//!
//! Each form goes through the same steps: normalize, validate, guard,
//! persist, then notify. Notification runs only after the row is stored and
//! its outcome never changes what the caller is told.

use partners_core::error::CoreError;
use partners_core::onboarding::normalize_email;
use partners_core::submission::{
    validate_terminal_details, ContactRequest, OnboardingRequest, FORM_TYPE_CONTACT,
    FORM_TYPE_ONBOARDING, ONBOARDING_DUPLICATE,
};
use partners_db::models::submission::{CreateSubmission, Submission};
use partners_db::StoreError;
use partners_notifications::{dispatch, templates, DeliveryOutcome, NotificationKind, PendingEmail};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A stored submission together with what happened to its notifications.
#[derive(Debug)]
pub struct Accepted {
    pub submission: Submission,
    pub deliveries: Vec<DeliveryOutcome>,
}

impl Accepted {
    pub fn failed_deliveries(&self) -> usize {
        self.deliveries.iter().filter(|d| !d.delivered).count()
    }
}

fn duplicate_onboarding() -> AppError {
    AppError::Core(CoreError::Conflict(ONBOARDING_DUPLICATE.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Run a merchant application through the full pipeline.
///
/// Nothing is stored or sent unless every validation passes and no earlier
/// application exists for the same (normalized) email.
pub async fn submit_onboarding(state: &AppState, mut request: OnboardingRequest) -> AppResult<Accepted> {
    request.email = normalize_email(&request.email);

    request.validate_schema()?;
    validate_terminal_details(&request)?;

    if let Some(existing) = state
        .store
        .find_one(FORM_TYPE_ONBOARDING, &request.email)
        .await?
    {
        tracing::info!(
            existing_id = existing.id,
            form_type = FORM_TYPE_ONBOARDING,
            "Duplicate onboarding application rejected",
        );
        return Err(duplicate_onboarding());
    }

    let submitted_at = chrono::Utc::now();
    let input = CreateSubmission {
        form_type: FORM_TYPE_ONBOARDING.to_string(),
        name: request.name.trim().to_string(),
        email: request.email.clone(),
        phone: Some(request.phone.trim().to_string()),
        company: Some(request.business_name.trim().to_string()),
        message: request.summary_message(),
        form_data: Some(request.form_data(submitted_at)),
    };

    let submission = match state.store.insert(&input).await {
        Ok(row) => row,
        // Lost the race against a concurrent request for the same email.
        Err(StoreError::Duplicate { .. }) => return Err(duplicate_onboarding()),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        submission_id = submission.id,
        form_type = FORM_TYPE_ONBOARDING,
        "Onboarding application stored",
    );

    let mut queue: Vec<PendingEmail> = state
        .config
        .admin_emails
        .iter()
        .map(|admin| {
            PendingEmail::new(
                NotificationKind::OperatorAlert,
                templates::onboarding_operator_alert(admin, submission.id, &request),
            )
        })
        .collect();
    queue.push(PendingEmail::new(
        NotificationKind::SubmitterConfirmation,
        templates::onboarding_confirmation(&request),
    ));

    let deliveries = dispatch(state.mailer.as_ref(), queue).await;

    Ok(Accepted {
        submission,
        deliveries,
    })
}

/// Store a contact-form message and alert the operators.
pub async fn submit_contact(state: &AppState, mut request: ContactRequest) -> AppResult<Accepted> {
    request.email = normalize_email(&request.email);
    request.validate_schema()?;

    let input = CreateSubmission {
        form_type: FORM_TYPE_CONTACT.to_string(),
        name: request.name.trim().to_string(),
        email: request.email.clone(),
        phone: non_empty(request.phone.clone()),
        company: non_empty(request.company.clone()),
        message: request.message.trim().to_string(),
        form_data: None,
    };

    let submission = state.store.insert(&input).await?;

    tracing::info!(
        submission_id = submission.id,
        form_type = FORM_TYPE_CONTACT,
        "Contact message stored",
    );

    let queue = state
        .config
        .admin_emails
        .iter()
        .map(|admin| {
            PendingEmail::new(
                NotificationKind::OperatorAlert,
                templates::contact_operator_alert(admin, submission.id, &request),
            )
        })
        .collect();

    let deliveries = dispatch(state.mailer.as_ref(), queue).await;

    Ok(Accepted {
        submission,
        deliveries,
    })
}
