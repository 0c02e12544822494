use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use blogr::{app::build_app, auth::jwt::JwtKeys, state::AppState};

// These tests go through the real router but only hit paths that are decided
// before any query runs, so the lazy pool in AppState::fake() is never used.

fn test_app() -> Router {
    build_app(AppState::fake())
}

fn signing_keys() -> JwtKeys {
    // Must match the secret in AppState::fake().
    JwtKeys::new("test-secret", Duration::from_secs(300))
}

async fn send_json(app: Router, method: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_with_token(app: Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn signup_with_empty_body_reports_name_first() {
    let (status, body) = send_json(test_app(), "POST", "/api/v1/signup", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Name is required");
    assert_eq!(body["status"], 422);
}

#[tokio::test]
async fn signup_validation_follows_rule_order() {
    let cases = [
        (json!({ "name": "basil alsheikh" }), "Email is required"),
        (
            json!({ "name": "basil", "email": "basil@gmailcom" }),
            "Email must be a valid email",
        ),
        (
            json!({ "name": "basil", "email": "basil@gmail.com" }),
            "Password is required",
        ),
        (
            json!({ "name": "basil", "email": "basil@gmail.com", "password": "bas" }),
            "Password must be at least 5 characters long",
        ),
        (
            json!({ "name": "basil", "email": "basil@gmail.com", "password": "basilbasilbasilbasil" }),
            "Password must not exceed 15 characters",
        ),
        (
            json!({ "name": "basil", "email": "basil@gmail.com", "password": "basil" }),
            "Confirmation password is required",
        ),
        (
            json!({ "name": "basil", "email": "basil@gmail.com", "password": "basil", "confirmationPassword": "basil100" }),
            "Confirmation password must match the password",
        ),
    ];

    for (payload, expected) in cases {
        let (status, body) = send_json(test_app(), "POST", "/api/v1/signup", payload).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], expected);
    }
}

#[tokio::test]
async fn login_validation_follows_rule_order() {
    let (status, body) = send_json(test_app(), "POST", "/api/v1/login", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Email is required");

    let (status, body) = send_json(
        test_app(),
        "POST",
        "/api/v1/login",
        json!({ "email": "basil@gmail.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Password is required");
}

#[tokio::test]
async fn auth_without_token_is_401() {
    let (status, body) = get_with_token(test_app(), "/api/v1/auth", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthenticated");
}

#[tokio::test]
async fn auth_with_garbage_token_is_401() {
    let (status, body) = get_with_token(test_app(), "/api/v1/auth", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthenticated");
}

#[tokio::test]
async fn auth_with_foreign_secret_token_is_401() {
    let foreign = JwtKeys::new("other-secret", Duration::from_secs(300));
    let token = foreign.sign(1, "basil", "basil@gmail.com").unwrap();
    let (status, body) = get_with_token(test_app(), "/api/v1/auth", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthenticated");
}

#[tokio::test]
async fn auth_with_tampered_signature_is_401() {
    let token = signing_keys().sign(1, "basil", "basil@gmail.com").unwrap();
    let sig_start = token.rfind('.').unwrap() + 1;
    let mut bytes = token.into_bytes();
    let i = sig_start + 2;
    bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    let (status, _) = get_with_token(test_app(), "/api/v1/auth", Some(&tampered)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_with_valid_token_returns_claims() {
    let token = signing_keys().sign(42, "basil", "basil@gmail.com").unwrap();
    let (status, body) = get_with_token(test_app(), "/api/v1/auth", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["id"], 42);
    assert_eq!(body["data"]["name"], "basil");
    assert_eq!(body["data"]["email"], "basil@gmail.com");
}

#[tokio::test]
async fn logout_always_succeeds() {
    let (status, body) = send_json(test_app(), "POST", "/api/v1/logout", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "You logged out successfully");
}

#[tokio::test]
async fn create_post_without_token_is_401() {
    let (status, body) = send_json(
        test_app(),
        "POST",
        "/api/v1/posts",
        json!({ "title": "t", "content": "c" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthenticated");
}

#[tokio::test]
async fn create_post_validation_runs_after_auth() {
    let token = signing_keys().sign(1, "basil", "basil@gmail.com").unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/posts")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(json!({}).to_string()))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Title is required");
}

#[tokio::test]
async fn health_is_ok() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
