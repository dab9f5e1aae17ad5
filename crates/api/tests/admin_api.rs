//! Integration tests for the operator submission review endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, contact_body, get, get_auth, onboarding_body,
    post_json, put_json_auth, viewer_token, TestApp,
};
use serde_json::json;

async fn seed(app: &TestApp) {
    post_json(&app.router, "/api/onboarding", onboarding_body("a@example.com")).await;
    post_json(&app.router, "/api/contact", contact_body("b@example.com")).await;
    post_json(&app.router, "/api/onboarding", onboarding_body("c@example.com")).await;
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = build_test_app();
    let response = get(&app.router, "/api/admin/submissions").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = build_test_app();
    let response = get_auth(&app.router, "/api/admin/submissions", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_role_is_forbidden() {
    let app = build_test_app();
    let response = get_auth(&app.router, "/api/admin/submissions", &viewer_token()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_is_newest_first() {
    let app = build_test_app();
    seed(&app).await;

    let response = get_auth(&app.router, "/api/admin/submissions", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    let ids: Vec<i64> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(data[0]["formType"], "onboarding");
}

#[tokio::test]
async fn list_filters_by_form_type_and_paginates() {
    let app = build_test_app();
    seed(&app).await;

    let response = get_auth(
        &app.router,
        "/api/admin/submissions?formType=onboarding&limit=1&offset=1",
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    let rows = data.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 1);
}

#[tokio::test]
async fn list_rejects_unknown_filters() {
    let app = build_test_app();

    let response = get_auth(
        &app.router,
        "/api/admin/submissions?formType=newsletter",
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(
        &app.router,
        "/api/admin/submissions?status=archived",
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Single submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_submission_by_id() {
    let app = build_test_app();
    seed(&app).await;

    let response = get_auth(&app.router, "/api/admin/submissions/2", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["formType"], "contact");
}

#[tokio::test]
async fn get_missing_submission_is_not_found() {
    let app = build_test_app();

    let response = get_auth(&app.router, "/api/admin/submissions/99", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Status workflow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_moves_forward_one_step_at_a_time() {
    let app = build_test_app();
    seed(&app).await;
    let token = admin_token();
    let uri = "/api/admin/submissions/1/status";

    let skipped = put_json_auth(&app.router, uri, json!({ "status": "resolved" }), &token).await;
    assert_eq!(skipped.status(), StatusCode::BAD_REQUEST);

    let contacted = put_json_auth(&app.router, uri, json!({ "status": "contacted" }), &token).await;
    assert_eq!(contacted.status(), StatusCode::OK);
    assert_eq!(body_json(contacted).await["data"]["status"], "contacted");

    let resolved = put_json_auth(&app.router, uri, json!({ "status": "resolved" }), &token).await;
    assert_eq!(resolved.status(), StatusCode::OK);

    let back = put_json_auth(&app.router, uri, json!({ "status": "new" }), &token).await;
    assert_eq!(back.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_update_requires_admin() {
    let app = build_test_app();
    seed(&app).await;

    let response = put_json_auth(
        &app.router,
        "/api/admin/submissions/1/status",
        json!({ "status": "contacted" }),
        &viewer_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn status_update_on_missing_submission_is_not_found() {
    let app = build_test_app();

    let response = put_json_auth(
        &app.router,
        "/api/admin/submissions/42/status",
        json!({ "status": "contacted" }),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
