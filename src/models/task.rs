use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task: an identifier, its text, and when it was created.
///
/// Tasks are the only entity in the system. The store assigns `id` and
/// `created_at` on insert; only `text` ever changes afterward. A task either
/// exists with all three fields populated or does not exist at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, unique for the lifetime of the store.
    pub id: i64,
    pub text: String,
    /// Assigned by the store at creation and never modified.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/addTask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskInput {
    pub text: String,
}

/// Request body for `PUT /api/updateTask`. Replaces the task's text wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub id: i64,
    pub text: String,
}

/// Request body for `DELETE /api/deleteTask`. The id travels in the body,
/// not the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTaskInput {
    pub id: i64,
}

/// Response envelope for the list operation: `{ "tasks": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

/// Response envelope for successful mutations and for client-visible
/// failures: `{ "message": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
