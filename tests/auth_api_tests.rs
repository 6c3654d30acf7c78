// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login, and current-user API tests.
//!
//! These tests drive the real router over the in-memory store and verify:
//! 1. The registration validation order and its error codes
//! 2. Token issuance is bound to the right user id
//! 3. Responses never carry the password hash
//! 4. The protected profile route honors bearer tokens

use axum::http::StatusCode;
use tower::ServiceExt;

mod common;
use common::{create_test_app, get_request, json_post, read_json};

#[tokio::test]
async fn test_register_success() {
    let (app, state) = create_test_app();

    let response = app
        .oneshot(json_post(
            "/user/register",
            serde_json::json!({"name": "Ada", "email": "a@b.com", "password": "Str0ng!pass"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["user"]["email"], "a@b.com");
    assert_eq!(body["user"]["name"], "Ada");
    assert!(body["user"].get("password_hash").is_none());

    // The token's subject must be the new user's id
    let user_id = body["user"]["id"].as_str().unwrap();
    let token = body["token"].as_str().unwrap();
    assert_eq!(state.token_service.verify(token).unwrap(), user_id);
}

#[tokio::test]
async fn test_register_defaults_name_to_anonymous() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_post(
            "/user/register",
            serde_json::json!({"email": "a@b.com", "password": "Str0ng!pass"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["user"]["name"], "Anonymous");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let (app, _) = create_test_app();

    for payload in [
        serde_json::json!({}),
        serde_json::json!({"email": "a@b.com"}),
        serde_json::json!({"password": "Str0ng!pass"}),
        serde_json::json!({"email": "", "password": "Str0ng!pass"}),
        serde_json::json!({"email": "a@b.com", "password": ""}),
    ] {
        let response = app
            .clone()
            .oneshot(json_post("/user/register", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "missing_fields");
    }
}

#[tokio::test]
async fn test_register_invalid_email() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_post(
            "/user/register",
            serde_json::json!({"email": "not-an-email", "password": "Str0ng!pass"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "invalid_email");
}

#[tokio::test]
async fn test_register_weak_password() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_post(
            "/user/register",
            serde_json::json!({"email": "a@b.com", "password": "password"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "weak_password");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (app, _) = create_test_app();

    let payload = serde_json::json!({"email": "a@b.com", "password": "Str0ng!pass"});

    let first = app
        .clone()
        .oneshot(json_post("/user/register", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_post("/user/register", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = read_json(second).await;
    assert_eq!(body["error"], "duplicate_user");
}

#[tokio::test]
async fn test_login_roundtrip() {
    let (app, state) = create_test_app();

    let register = app
        .clone()
        .oneshot(json_post(
            "/user/register",
            serde_json::json!({"email": "a@b.com", "password": "Str0ng!pass"}),
        ))
        .await
        .unwrap();
    let register_body = read_json(register).await;
    let registered_id = register_body["user"]["id"].as_str().unwrap().to_string();
    let register_token = register_body["token"].as_str().unwrap().to_string();

    let login = app
        .oneshot(json_post(
            "/user/login",
            serde_json::json!({"email": "a@b.com", "password": "Str0ng!pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);

    let login_body = read_json(login).await;
    let login_token = login_body["token"].as_str().unwrap();

    // A fresh token, distinct from registration's, resolving to the same user
    assert_ne!(login_token, register_token);
    assert_eq!(state.token_service.verify(login_token).unwrap(), registered_id);
    assert_eq!(
        state.token_service.verify(&register_token).unwrap(),
        registered_id
    );

    // Hash never leaves the server
    assert!(login_body["user"].get("password_hash").is_none());
    assert_eq!(login_body["user"]["email"], "a@b.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (app, _) = create_test_app();

    app.clone()
        .oneshot(json_post(
            "/user/register",
            serde_json::json!({"email": "a@b.com", "password": "Str0ng!pass"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_post(
            "/user/login",
            serde_json::json!({"email": "a@b.com", "password": "Wr0ng!pass"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "invalid_credentials");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_post(
            "/user/login",
            serde_json::json!({"email": "nobody@b.com", "password": "Str0ng!pass"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "user_not_found");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_post(
            "/user/login",
            serde_json::json!({"email": "a@b.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "missing_fields");
}

#[tokio::test]
async fn test_get_user_requires_token() {
    let (app, _) = create_test_app();

    let without = app
        .clone()
        .oneshot(get_request("/user/getUser", None))
        .await
        .unwrap();
    assert_eq!(without.status(), StatusCode::UNAUTHORIZED);

    let invalid = app
        .oneshot(get_request("/user/getUser", Some("invalid.token.here")))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_with_valid_token() {
    let (app, _) = create_test_app();

    let register = app
        .clone()
        .oneshot(json_post(
            "/user/register",
            serde_json::json!({"name": "Ada", "email": "a@b.com", "password": "Str0ng!pass"}),
        ))
        .await
        .unwrap();
    let body = read_json(register).await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(get_request("/user/getUser", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["user"]["email"], "a@b.com");
    assert_eq!(body["user"]["name"], "Ada");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_health_and_cors() {
    let (app, _) = create_test_app();

    let health = app
        .clone()
        .oneshot(get_request("/health", None))
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let preflight = app
        .oneshot(
            axum::http::Request::builder()
                .method("OPTIONS")
                .uri("/user/login")
                .header(axum::http::header::ORIGIN, "http://localhost:3000")
                .header(axum::http::header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(preflight.status(), StatusCode::OK);
    assert!(preflight
        .headers()
        .contains_key(axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
