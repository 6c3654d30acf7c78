// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Taskhub: a small task-tracking API
//!
//! This crate provides the backend for registering users, logging in with
//! bearer tokens, and keeping a shared task list in a key-value store.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Store;
use services::{PasswordHasher, TokenService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Store,
    pub password_hasher: PasswordHasher,
    pub token_service: TokenService,
}
