// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration, login, and profile routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::ValidateEmail;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::user::{User, UserProfile};
use crate::AppState;

const MIN_PASSWORD_LEN: usize = 8;

/// Public user routes (no auth required).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/login", post(login))
}

/// User routes behind the auth middleware (applied in routes/mod.rs).
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/user/getUser", get(get_user))
}

/// Response for register and login: the user plus a fresh session token.
#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

// ─── Registration ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Register a new account.
///
/// Validation short-circuits on the first failure, before any store write:
/// missing fields, then email syntax, then password strength, then the
/// duplicate-email check.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let (email, password) = require_credentials(body.email.as_deref(), body.password.as_deref())?;

    if !email.validate_email() {
        return Err(AppError::InvalidEmail);
    }
    if !is_strong_password(password) {
        return Err(AppError::WeakPassword);
    }

    // Existence check and insert are two store round-trips; two concurrent
    // registrations for the same email can both pass the check.
    if state.db.get_user_by_email(email).await?.is_some() {
        return Err(AppError::DuplicateUser);
    }

    let password_hash = state.password_hasher.hash(password)?;

    let name = body
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Anonymous".to_string());

    let user = User::new(name, email.to_string(), password_hash);
    state.db.insert_user(&user).await?;

    let token = state.token_service.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.profile(),
            token,
        }),
    ))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Log in with email and password.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let (email, password) = require_credentials(body.email.as_deref(), body.password.as_deref())?;

    let user = state
        .db
        .get_user_by_email(email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    if !state.password_hasher.verify(password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.token_service.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: user.profile(),
        token,
    }))
}

// ─── Current User ────────────────────────────────────────────

#[derive(Serialize)]
pub struct CurrentUserResponse {
    pub user: Option<UserProfile>,
}

/// Get the profile of the authenticated user.
///
/// The token was already verified by the auth middleware; this only does
/// the store lookup. `user` is null when the record has vanished. A store
/// failure here surfaces as 502.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<CurrentUserResponse>> {
    let user = state
        .db
        .get_user_by_id(&auth.user_id)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(CurrentUserResponse {
        user: user.map(|u| u.profile()),
    }))
}

// ─── Validation Helpers ──────────────────────────────────────

/// Both fields present and non-empty, or `MissingFields`.
fn require_credentials<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str)> {
    match (email, password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(AppError::MissingFields),
    }
}

/// Minimum length plus one character from each class: lowercase, uppercase,
/// digit, symbol.
fn is_strong_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}
