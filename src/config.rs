//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup and handed to the handlers through
//! `AppState`; there is no ambient global configuration.

use std::env;

/// Token lifetime when TOKEN_TTL_SECS is not set: 3 days.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3 * 24 * 60 * 60;

/// bcrypt work factor when BCRYPT_COST is not set.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Redis connection URL
    pub redis_url: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Session token lifetime in seconds
    pub token_ttl_secs: u64,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// For local development, secrets can be set via a .env file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            jwt_signing_key: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
                .into_bytes(),
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BCRYPT_COST),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 5000,
            frontend_url: "http://localhost:3000".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            bcrypt_cost: 4, // bcrypt's minimum, keeps tests fast
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
