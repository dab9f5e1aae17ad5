//! HTTP transport for posting a finished application.

use async_trait::async_trait;
use partners_core::error::FieldErrors;
use partners_core::submission::{OnboardingAccepted, OnboardingRequest};
use serde::Deserialize;

/// Why a submission did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The server refused the payload (HTTP 400).
    #[error("{message}")]
    Rejected { message: String, details: FieldErrors },

    /// An application already exists for this email (HTTP 409).
    #[error("{message}")]
    Duplicate { message: String },

    /// Any other non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request never produced a response, or the response was unreadable.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Delivers an application to the submission service.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, request: &OnboardingRequest) -> Result<OnboardingAccepted, SubmitError>;
}

/// Error body returned by the API: `{ error, code, details? }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: FieldErrors,
}

/// Posts JSON to `{base_url}/api/onboarding` with [`reqwest`].
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// * `base_url` - Origin of the API server, e.g. `https://partnerspoints.ae`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool, custom timeouts).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/onboarding", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Map a non-success status and its body into a [`SubmitError`].
fn classify_failure(status: u16, body: &str) -> SubmitError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    match (status, parsed) {
        (400, Some(b)) => SubmitError::Rejected {
            message: b.error,
            details: b.details,
        },
        (400, None) => SubmitError::Rejected {
            message: "The application was rejected".to_string(),
            details: FieldErrors::new(),
        },
        (409, Some(b)) => SubmitError::Duplicate { message: b.error },
        (409, None) => SubmitError::Duplicate {
            message: "An application already exists for this email".to_string(),
        },
        (status, parsed) => SubmitError::Server {
            status,
            message: parsed
                .map(|b| b.error)
                .unwrap_or_else(|| "Unexpected response from server".to_string()),
        },
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn submit(&self, request: &OnboardingRequest) -> Result<OnboardingAccepted, SubmitError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<OnboardingAccepted>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "Onboarding submission failed");
        Err(classify_failure(status.as_u16(), &body))
    }
}
