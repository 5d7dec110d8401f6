use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::db::Database;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Handler error: a status code plus the JSON body to send with it.
///
/// Validation and not-found failures use the `{ "message": ... }` envelope.
/// Store failures use `{ "error": ..., "details": ... }` with the full error
/// chain logged server-side.
type ApiError = (StatusCode, Json<serde_json::Value>);

fn validation_error(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "message": message })),
    )
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Task not found." })),
    )
}

/// Log a store failure and return the sanitized 500 response. Clients get a
/// stable per-operation `error` string; the chain is logged for debugging.
fn store_error(error: &'static str, e: anyhow::Error) -> ApiError {
    tracing::error!("Database error: {:#}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": error, "details": e.to_string() })),
    )
}

/// Trimmed task text out of the raw body, or the validation failure shared
/// by add and update. Anything but a non-blank string is rejected, so a
/// wrong-typed value gets the same message as a missing one.
fn require_text(value: Option<&Value>) -> Result<String, ApiError> {
    let trimmed = value.and_then(Value::as_str).unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(validation_error(
            "Task text is required and cannot be empty.",
        ));
    }
    Ok(trimmed.to_string())
}

/// A usable task id out of the raw body. Ids are store-assigned integers
/// starting at 1, so zero, negative, fractional, and non-number values are
/// rejected along with a missing field.
fn require_id(value: Option<&Value>) -> Result<i64, ApiError> {
    match value.and_then(Value::as_i64) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(validation_error("Task ID is required and must be a number.")),
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Tasks
// ============================================================

pub async fn get_tasks(State(db): State<Database>) -> Result<Json<TaskListResponse>, ApiError> {
    let tasks = db
        .list_tasks()
        .map_err(|e| store_error("Failed to fetch tasks from database", e))?;
    Ok(Json(TaskListResponse { tasks }))
}

pub async fn add_task(
    State(db): State<Database>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let text = require_text(body.get("text"))?;

    db.create_task(&text)
        .map_err(|e| store_error("Failed to add task to database", e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Task added successfully".to_string(),
        }),
    ))
}

pub async fn update_task(
    State(db): State<Database>,
    Json(body): Json<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = require_id(body.get("id"))?;
    let text = require_text(body.get("text"))?;

    let updated = db
        .update_task(id, &text)
        .map_err(|e| store_error("Failed to update task in database", e))?;
    if !updated {
        return Err(not_found());
    }

    Ok(Json(MessageResponse {
        message: "Task updated successfully".to_string(),
    }))
}

pub async fn delete_task(
    State(db): State<Database>,
    Json(body): Json<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = require_id(body.get("id"))?;

    let deleted = db
        .delete_task(id)
        .map_err(|e| store_error("Failed to delete task from database", e))?;
    if !deleted {
        return Err(not_found());
    }

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
