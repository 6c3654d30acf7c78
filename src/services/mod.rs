// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - credential hashing and session tokens.

pub mod password;
pub mod token;

pub use password::PasswordHasher;
pub use token::TokenService;
