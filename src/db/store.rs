// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value store client with typed operations.
//!
//! Provides high-level operations for:
//! - Users (credential documents, keyed by email and by id)
//! - Tasks (the whole list as one versioned JSON envelope under a single key)
//!
//! The production backend is Redis; tests run against an in-memory backend
//! with the same semantics.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use std::sync::Arc;

use crate::db::keys;
use crate::error::AppError;
use crate::models::task::{Task, TaskList};
use crate::models::user::User;

const CONNECT_RETRIES: usize = 3;

/// Compare-and-swap for a versioned envelope: writes ARGV[2] only when the
/// stored envelope's `version` equals ARGV[1] (0 for a missing key).
const CAS_SCRIPT: &str = r#"
local cur = redis.call('GET', KEYS[1])
local ver = 0
if cur then
  ver = cjson.decode(cur)['version']
end
if ver ~= tonumber(ARGV[1]) then
  return 0
end
redis.call('SET', KEYS[1], ARGV[2])
return 1
"#;

/// Store client. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Redis(ConnectionManager),
    /// In-memory backend for tests and offline development.
    Memory(Arc<DashMap<String, String>>),
}

impl Store {
    /// Connect to Redis.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::Database(format!("invalid Redis URL: {}", e)))?;

        let config = ConnectionManagerConfig::new().set_number_of_retries(CONNECT_RETRIES);

        let manager = client
            .get_connection_manager_with_config(config)
            .await
            .map_err(|e| AppError::Database(format!("failed to connect to Redis: {}", e)))?;

        tracing::info!("Connected to Redis");

        Ok(Self {
            backend: Backend::Redis(manager),
        })
    }

    /// Create an in-memory store (tests and offline development).
    pub fn new_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    // ─── Raw Primitives ──────────────────────────────────────────

    async fn get_raw(&self, key: &str) -> Result<Option<String>, AppError> {
        match &self.backend {
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                conn.get(key)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }
            Backend::Memory(map) => Ok(map.get(key).map(|v| v.value().clone())),
        }
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                let _: () = conn
                    .set(key, value)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(map) => {
                map.insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    /// Write a versioned envelope only if the stored version still matches
    /// `expected_version`. Returns false on a version conflict.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected_version: u64,
        envelope: &str,
    ) -> Result<bool, AppError> {
        match &self.backend {
            Backend::Redis(manager) => {
                let mut conn = manager.clone();
                let swapped: i64 = redis::Script::new(CAS_SCRIPT)
                    .key(key)
                    .arg(expected_version)
                    .arg(envelope)
                    .invoke_async(&mut conn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(swapped == 1)
            }
            Backend::Memory(map) => {
                // The entry holds its shard lock, so check-and-write is atomic.
                match map.entry(key.to_string()) {
                    Entry::Occupied(mut entry) => {
                        let current: serde_json::Value = serde_json::from_str(entry.get())
                            .map_err(|e| AppError::Database(e.to_string()))?;
                        if current["version"].as_u64().unwrap_or(0) != expected_version {
                            return Ok(false);
                        }
                        entry.insert(envelope.to_string());
                        Ok(true)
                    }
                    Entry::Vacant(entry) => {
                        if expected_version != 0 {
                            return Ok(false);
                        }
                        entry.insert(envelope.to_string());
                        Ok(true)
                    }
                }
            }
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Look up a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.get_user_doc(&keys::user_by_email(email)).await
    }

    /// Look up a user by id.
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.get_user_doc(&keys::user_by_id(id)).await
    }

    async fn get_user_doc(&self, key: &str) -> Result<Option<User>, AppError> {
        match self.get_raw(key).await? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| AppError::Database(format!("corrupt user document: {}", e))),
            None => Ok(None),
        }
    }

    /// Persist a new user under both its email and id keys.
    ///
    /// The store enforces no uniqueness; callers check for an existing
    /// email first, and that check and this insert are separate round-trips.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let json = serde_json::to_string(user).map_err(|e| AppError::Database(e.to_string()))?;

        self.set_raw(&keys::user_by_email(&user.email), &json)
            .await?;
        self.set_raw(&keys::user_by_id(&user.id), &json).await?;
        Ok(())
    }

    // ─── Task Operations ─────────────────────────────────────────

    /// Load the full task list.
    ///
    /// A key never written reads as an empty list at version 0.
    pub async fn load_tasks(&self) -> Result<TaskList, AppError> {
        match self.get_raw(keys::TASKS).await? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| AppError::Database(format!("corrupt task list: {}", e))),
            None => Ok(TaskList::default()),
        }
    }

    /// Write the full task list, guarded by the version read beforehand.
    ///
    /// Returns false when another writer got there first; callers re-read
    /// and retry.
    pub async fn store_tasks(
        &self,
        tasks: &[Task],
        expected_version: u64,
    ) -> Result<bool, AppError> {
        let envelope = TaskList {
            version: expected_version + 1,
            tasks: tasks.to_vec(),
        };
        let json =
            serde_json::to_string(&envelope).map_err(|e| AppError::Database(e.to_string()))?;

        self.compare_and_swap(keys::TASKS, expected_version, &json)
            .await
    }
}
