use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// Any status may be changed to any other; there is no enforced workflow.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Newly created, not started.
    Open,
    /// Currently being worked on.
    InProgress,
    /// Completed.
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        };
        f.write_str(s)
    }
}

/// Represents a task as stored in the database and returned by the API.
///
/// Only the owner's id is carried; the owning `User` is never attached to a task
/// handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Identifier of the user who owns the task.
    pub user_id: i32,
}

/// A task row that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub user_id: i32,
}

/// Payload for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskDto {
    /// Must not be empty.
    #[validate(length(min = 1))]
    pub title: String,
    /// Must not be empty.
    #[validate(length(min = 1))]
    pub description: String,
}

/// Query parameters for listing tasks. Both filters are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GetTasksFilter {
    /// Only tasks in this status.
    pub status: Option<TaskStatus>,
    /// Substring matched against title or description.
    #[validate(length(min = 1))]
    pub search: Option<String>,
}

/// Payload for `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateTaskStatusDto {
    pub status: TaskStatus,
}
