//! Shared helpers for API integration tests.
//!
//! The app is built with the in-memory submission store and scripted
//! mailers, so no database or SMTP server is needed.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use partners_api::auth::jwt::{Claims, JwtConfig, ROLE_ADMIN};
use partners_api::config::ServerConfig;
use partners_api::router::build_app_router;
use partners_api::state::AppState;
use partners_core::submission::SubmissionStatus;
use partners_core::types::DbId;
use partners_db::models::submission::{CreateSubmission, Submission};
use partners_db::{InMemorySubmissionStore, StoreError, SubmissionStore};
use partners_notifications::{EmailError, Mailer, OutgoingEmail};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "ops@partnerspoints.ae";
pub const SECOND_ADMIN_EMAIL: &str = "sales@partnerspoints.ae";

/// Build a test `ServerConfig` with safe defaults and two operator addresses.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_emails: vec![ADMIN_EMAIL.to_string(), SECOND_ADMIN_EMAIL.to_string()],
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Mailers
// ---------------------------------------------------------------------------

/// Records every message and succeeds.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn recipients(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|e| e.to.clone()).collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Counts attempts and fails every one of them.
#[derive(Default)]
pub struct FailingMailer {
    pub attempts: Mutex<usize>,
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), EmailError> {
        *self.attempts.lock().unwrap() += 1;
        Err(EmailError::Build("smtp relay unreachable".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Wraps an in-memory store but never finds an existing row, so a second
/// application for the same email slips past the lookup and only the
/// insert-time uniqueness check can stop it.
pub struct StaleLookupStore {
    pub inner: Arc<InMemorySubmissionStore>,
}

#[async_trait]
impl SubmissionStore for StaleLookupStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.health_check().await
    }

    async fn find_one(&self, _form_type: &str, _email: &str) -> Result<Option<Submission>, StoreError> {
        Ok(None)
    }

    async fn insert(&self, input: &CreateSubmission) -> Result<Submission, StoreError> {
        self.inner.insert(input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Submission>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn list(
        &self,
        form_type: Option<&str>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, StoreError> {
        self.inner.list(form_type, status, limit, offset).await
    }

    async fn update_status(
        &self,
        id: DbId,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>, StoreError> {
        self.inner.update_status(id, status).await
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// A router plus handles on its collaborators for assertions.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemorySubmissionStore>,
    pub mailer: Arc<RecordingMailer>,
}

/// Build the full application router with an empty store and a recording mailer.
pub fn build_test_app() -> TestApp {
    let store = Arc::new(InMemorySubmissionStore::new());
    let mailer = Arc::new(RecordingMailer::default());
    let router = build_test_router(store.clone(), mailer.clone());
    TestApp {
        router,
        store,
        mailer,
    }
}

/// Build the full application router around the given collaborators.
pub fn build_test_router(store: Arc<dyn SubmissionStore>, mailer: Arc<dyn Mailer>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        mailer,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Sign a token the way the back-office identity service would.
fn sign_token(subject: &str, role: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        role: role.to_string(),
        exp: now + 3600,
        iat: now,
        jti: uuid::Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(test_config().jwt.secret.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    sign_token(ADMIN_EMAIL, ROLE_ADMIN)
}

pub fn viewer_token() -> String {
    sign_token("viewer@partnerspoints.ae", "viewer")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A valid application with no RFM terminal.
pub fn onboarding_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Ahmed Ali",
        "businessName": "Al Manara Trading",
        "industry": "retail",
        "locationCount": 2,
        "selectedEmirates": ["dubai"],
        "monthlyCustomers": [1000],
        "hasRfmTerminal": false,
        "email": email,
        "phone": "+971501234123",
        "designation": "Owner",
        "acceptedTerms": true
    })
}

pub fn contact_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Sara Khan",
        "email": email,
        "company": "Khan Cafe",
        "message": "We would like to learn more about the loyalty program."
    })
}
