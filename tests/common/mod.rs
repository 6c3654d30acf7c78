// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;
use taskhub::config::Config;
use taskhub::db::Store;
use taskhub::routes::create_router;
use taskhub::services::{PasswordHasher, TokenService};
use taskhub::AppState;

/// Create a test app over the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Store::new_memory();
    let password_hasher = PasswordHasher::new(config.bcrypt_cost);
    let token_service = TokenService::new(&config.jwt_signing_key, config.token_ttl_secs);

    let state = Arc::new(AppState {
        config,
        db,
        password_hasher,
        token_service,
    });

    (create_router(state.clone()), state)
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn json_post(uri: &str, body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

/// Build a GET request, optionally with a bearer token.
#[allow(dead_code)]
pub fn get_request(uri: &str, token: Option<&str>) -> axum::http::Request<axum::body::Body> {
    let mut builder = axum::http::Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", token),
        );
    }
    builder.body(axum::body::Body::empty()).unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
