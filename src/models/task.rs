//! Task model and the versioned list envelope.

use serde::{Deserialize, Serialize};

/// A single task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier (UUID v4)
    pub id: String,
    pub title: String,
    /// Longer free-form text; only some clients send it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the task was created (RFC 3339)
    pub created_at: String,
}

impl Task {
    pub fn new(title: String, description: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// The full task collection as stored under the single list key.
///
/// `version` increments on every successful write and is the token checked
/// by the store's compare-and-swap. An unwritten key reads as version 0
/// with no tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskList {
    pub version: u64,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_omitted_when_absent() {
        let task = Task::new("buy milk".to_string(), None);
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("description").is_none());

        let task = Task::new("walk dog".to_string(), Some("around the block".to_string()));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["description"], "around the block");
    }

    #[test]
    fn test_envelope_tolerates_missing_tasks_field() {
        let list: TaskList = serde_json::from_str(r#"{"version": 3}"#).unwrap();
        assert_eq!(list.version, 3);
        assert!(list.tasks.is_empty());
    }
}
