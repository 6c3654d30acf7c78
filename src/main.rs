// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Taskhub API Server
//!
//! REST backend for the task-tracking frontend: user registration and
//! login with bearer tokens, plus a shared task list kept in Redis.

use std::sync::Arc;
use taskhub::{
    config::Config,
    db::Store,
    services::{PasswordHasher, TokenService},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Taskhub API");

    // Connect to the credential/task store
    let db = Store::connect(&config.redis_url)
        .await
        .expect("Failed to connect to Redis");

    let password_hasher = PasswordHasher::new(config.bcrypt_cost);
    let token_service = TokenService::new(&config.jwt_signing_key, config.token_ttl_secs);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        password_hasher,
        token_service,
    });

    // Build router
    let app = taskhub::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taskhub=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
