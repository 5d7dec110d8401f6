//! HTTP client for the Nebula Tasks API.
//!
//! Used by the task-list controller and by end-to-end tests. Configuration
//! is via environment variables:
//! - `NEBULA_TASKS_URL` - Base URL (default: `http://localhost:3000/api`)

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::{
    AddTaskInput, DeleteTaskInput, MessageResponse, Task, TaskListResponse, UpdateTaskInput,
};

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:3000/api";

/// HTTP client errors, one variant per failure class callers distinguish.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: no HTTP status was received at all.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP client for the Nebula Tasks API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
    client: Client,
}

impl TaskClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("NEBULA_TASKS_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    /// Create with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Handle response, converting HTTP error statuses to ClientError.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(status_error(status, body))
        }
    }

    /// Handle response whose body carries only a confirmation message.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(status_error(status, body))
        }
    }

    /// Fetch the full task collection.
    pub async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let response = self
            .client
            .get(format!("{}/getTasks", self.base_url))
            .send()
            .await?;
        let body: TaskListResponse = self.handle_response(response).await?;
        Ok(body.tasks)
    }

    /// Create a task. The server trims `text` before storing it.
    pub async fn create(&self, text: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/addTask", self.base_url))
            .json(&AddTaskInput {
                text: text.to_string(),
            })
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Replace a task's text. The id travels in the request body.
    pub async fn update(&self, id: i64, text: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .put(format!("{}/updateTask", self.base_url))
            .json(&UpdateTaskInput {
                id,
                text: text.to_string(),
            })
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Delete a task. The id travels in the request body.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(format!("{}/deleteTask", self.base_url))
            .json(&DeleteTaskInput { id })
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Hit the health endpoint. `Ok` means a server answered.
    pub async fn health(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}

/// Map an error status to the matching variant, pulling the human-readable
/// message out of the `{ "message": ... }` envelope when there is one.
fn status_error(status: StatusCode, body: String) -> ClientError {
    let message = serde_json::from_str::<MessageResponse>(&body)
        .map(|m| m.message)
        .unwrap_or(body);

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST => ClientError::BadRequest(message),
        _ => ClientError::Server(format!("{}: {}", status, message)),
    }
}
