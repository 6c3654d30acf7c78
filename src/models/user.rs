//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User record as stored in the credential store.
///
/// Serialized in full (password hash included) under both the email-keyed
/// and id-keyed documents. API responses use [`UserProfile`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier (UUID v4), also the token subject
    pub id: String,
    /// Display name, "Anonymous" when not provided at registration
    pub name: String,
    /// Email address (unique across users, case-sensitive as stored)
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// When the account was created (RFC 3339)
    pub created_at: String,
}

impl User {
    /// Build a new user record with a fresh id.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// The client-facing view of this user. Carries no password hash.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// User shape returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}
