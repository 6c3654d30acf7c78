// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please enter all fields")]
    MissingFields,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Please enter a strong password")]
    WeakPassword,

    #[error("User already exists")]
    DuplicateUser,

    #[error("User does not exist")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Title is required")]
    MissingTitle,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Task list write contention")]
    WriteContention,

    #[error("Upstream store error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Client errors carry their message; store and signing failures are
        // logged server-side and the body stays opaque.
        let (status, error, with_details) = match &self {
            AppError::MissingFields => (StatusCode::BAD_REQUEST, "missing_fields", true),
            AppError::InvalidEmail => (StatusCode::BAD_REQUEST, "invalid_email", true),
            AppError::WeakPassword => (StatusCode::BAD_REQUEST, "weak_password", true),
            AppError::DuplicateUser => (StatusCode::BAD_REQUEST, "duplicate_user", true),
            AppError::UserNotFound => (StatusCode::BAD_REQUEST, "user_not_found", true),
            AppError::InvalidCredentials => (StatusCode::BAD_REQUEST, "invalid_credentials", true),
            AppError::MissingTitle => (StatusCode::BAD_REQUEST, "missing_title", true),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", false),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", false),
            AppError::ExpiredToken => (StatusCode::UNAUTHORIZED, "expired_token", false),
            AppError::WriteContention => {
                tracing::error!("Task list write contention unresolved after retries");
                (StatusCode::INTERNAL_SERVER_ERROR, "write_conflict", false)
            }
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream store error");
                (StatusCode::BAD_GATEWAY, "upstream_error", false)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", false)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", false)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details: with_details.then(|| self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
