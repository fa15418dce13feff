use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Every task starts here.
    #[default]
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

/// Input for creating a task.
///
/// Both fields default to the empty string when absent from the request body,
/// and neither is length-checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Owner of the task. Listing is always filtered on this.
    pub user_id: i32,
}

impl Task {
    /// Builds a freshly created task owned by `user_id`. The status is always `Pending`.
    pub fn new(id: i32, input: NewTask, user_id: i32) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            status: TaskStatus::Pending,
            user_id,
        }
    }
}
