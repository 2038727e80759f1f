//! Request validation tests for the HTTP surface
//!
//! Missing and empty body fields must behave identically: a 400 with an
//! `{"error": ...}` JSON body, never an extractor-level rejection. These
//! tests run against the full router with a lazy connection pool; every
//! request here is rejected by validation before any query is attempted,
//! so no database is needed.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use messagely::{
    jwt::{JwtConfig, TokenService},
    password::{HashingConfig, PasswordService},
    repositories::{MessageRepository, UserRepository},
    routes, AppState,
};

const TEST_SECRET: &str = "validation-test-secret";

fn test_app() -> Router {
    // connect_lazy defers any connection until a query runs; these tests
    // never get that far.
    let pool = PgPool::connect_lazy("postgresql://postgres@localhost/messagely")
        .expect("lazy pool");

    let token_service = TokenService::new(&JwtConfig {
        secret_key: TEST_SECRET.to_string(),
    });

    let password_service = PasswordService::new(&HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("password service");

    let user_repository = UserRepository::new(pool.clone(), password_service);
    let message_repository = MessageRepository::new(pool.clone());

    routes::create_router(AppState {
        db_pool: pool,
        token_service,
        user_repository,
        message_repository,
    })
}

async fn post_json(app: &Router, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(body.to_string())).expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("json error body");
    (status, body)
}

fn assert_validation_error(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].is_string(),
        "error body must be {{\"error\": ...}}, got {}",
        body
    );
}

#[tokio::test]
async fn test_login_with_missing_field_is_bad_request() {
    let app = test_app();

    let (status, body) = post_json(&app, "/auth/login", json!({"username": "alice"}), None).await;
    assert_validation_error(status, &body);
    assert_eq!(body["error"], "password is required");

    let (status, body) = post_json(&app, "/auth/login", json!({"password": "secret1"}), None).await;
    assert_validation_error(status, &body);
    assert_eq!(body["error"], "username is required");

    let (status, body) = post_json(&app, "/auth/login", json!({}), None).await;
    assert_validation_error(status, &body);
}

#[tokio::test]
async fn test_login_missing_and_empty_field_behave_identically() {
    let app = test_app();

    let (missing_status, missing_body) =
        post_json(&app, "/auth/login", json!({"username": "alice"}), None).await;
    let (empty_status, empty_body) = post_json(
        &app,
        "/auth/login",
        json!({"username": "alice", "password": ""}),
        None,
    )
    .await;

    assert_eq!(missing_status, empty_status);
    assert_eq!(missing_body, empty_body);
}

#[tokio::test]
async fn test_register_with_missing_field_is_bad_request() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/auth/register",
        json!({
            "username": "alice",
            "password": "secret1",
            "first_name": "Alice",
            "last_name": "Example",
        }),
        None,
    )
    .await;
    assert_validation_error(status, &body);
    assert_eq!(body["error"], "phone is required");

    let (status, body) = post_json(&app, "/auth/register", json!({}), None).await;
    assert_validation_error(status, &body);
}

#[tokio::test]
async fn test_send_message_with_missing_field_is_bad_request() {
    let app = test_app();
    let tokens = TokenService::new(&JwtConfig {
        secret_key: TEST_SECRET.to_string(),
    });
    let token = tokens.issue("alice").expect("token");

    let (status, body) = post_json(
        &app,
        "/messages",
        json!({"to_username": "bob"}),
        Some(&token),
    )
    .await;
    assert_validation_error(status, &body);
    assert_eq!(body["error"], "body is required");

    let (status, body) = post_json(&app, "/messages", json!({"body": "hi"}), Some(&token)).await;
    assert_validation_error(status, &body);
    assert_eq!(body["error"], "to_username is required");
}
