//! Storage layer (Redis-backed key-value store).

pub mod store;

pub use store::Store;

/// Key namespaces.
pub mod keys {
    /// The single key holding the serialized task list
    pub const TASKS: &str = "tasks";

    /// Email-keyed user document
    pub fn user_by_email(email: &str) -> String {
        format!("user:email:{}", email)
    }

    /// Id-keyed user document
    pub fn user_by_id(id: &str) -> String {
        format!("user:id:{}", id)
    }
}
