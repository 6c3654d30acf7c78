// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing (bcrypt).

use crate::error::{AppError, Result};

/// Salted one-way password hashing with a configurable work factor.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password with a random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {}", e)))
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns false on mismatch or an unparseable hash, never an error.
    /// The underlying comparison is constant-time.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        bcrypt::verify(plaintext, hashed).unwrap_or(false)
    }
}
