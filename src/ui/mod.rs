//! Task-list UI: an explicit state value plus the async controller that
//! drives it through the HTTP client.
//!
//! The embedded browser page implements the same state machine in
//! JavaScript; this module is the canonical, testable statement of it.

mod state;

pub use state::{EditDraft, RowState, TaskListState, ViewMode};

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::client::TaskClient;

/// How long a successfully deleted row keeps rendering before it is removed
/// from local state. Matches the page's exit animation duration.
pub const EXIT_TRANSITION: Duration = Duration::from_millis(400);

/// Drives [`TaskListState`] through the HTTP client.
///
/// Methods take `&self` so independent user actions can be awaited
/// concurrently. The state sits behind a mutex that is only held for
/// synchronous transitions, never across an await.
#[derive(Clone)]
pub struct TaskListController {
    client: TaskClient,
    state: Arc<Mutex<TaskListState>>,
    exit_transition: Duration,
}

impl TaskListController {
    pub fn new(client: TaskClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(TaskListState::new())),
            exit_transition: EXIT_TRANSITION,
        }
    }

    /// Override the exit transition window (tests shorten it).
    pub fn with_exit_transition(mut self, window: Duration) -> Self {
        self.exit_transition = window;
        self
    }

    /// Snapshot of the current UI state.
    pub fn state(&self) -> TaskListState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, TaskListState> {
        self.state.lock().expect("ui state lock poisoned")
    }

    /// Fetch the full collection and reconcile local state with it.
    pub async fn refresh(&self) {
        self.lock().list_started();
        match self.client.list().await {
            Ok(tasks) => self.lock().list_succeeded(tasks),
            Err(e) => self
                .lock()
                .list_failed(format!("Failed to fetch tasks: {}", e)),
        }
    }

    /// Submit a new task, then refetch so the list shows store-assigned
    /// fields. Input that is empty after trimming is dropped locally
    /// without a request.
    pub async fn add_task(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        match self.client.create(text).await {
            Ok(()) => self.refresh().await,
            Err(e) => self
                .lock()
                .surface_error(format!("Failed to add task: {}", e)),
        }
    }

    pub fn begin_edit(&self, id: i64) -> bool {
        self.lock().begin_edit(id)
    }

    pub fn set_draft(&self, text: &str) {
        self.lock().set_draft(text);
    }

    pub fn cancel_edit(&self) {
        self.lock().cancel_edit();
    }

    /// Persist the current draft, then refetch. On failure the row stays
    /// in editing so nothing typed is lost.
    pub async fn save_edit(&self) {
        let Some(draft) = self.lock().editing().cloned() else {
            return;
        };
        match self.client.update(draft.id, &draft.text).await {
            Ok(()) => {
                self.lock().edit_saved();
                self.refresh().await;
            }
            Err(e) => self
                .lock()
                .surface_error(format!("Failed to update task: {}", e)),
        }
    }

    /// Delete a task optimistically: the row enters its exit transition
    /// immediately, is removed locally once the server confirms and the
    /// transition has elapsed, and reverts if the server refuses. A second
    /// request for an id already in flight is ignored, so a delete is never
    /// applied twice.
    pub async fn delete_task(&self, id: i64) {
        if !self.lock().request_delete(id) {
            return;
        }
        match self.client.delete(id).await {
            Ok(()) => {
                tokio::time::sleep(self.exit_transition).await;
                self.lock().delete_settled(id);
            }
            Err(e) => self
                .lock()
                .delete_failed(id, format!("Failed to delete task: {}", e)),
        }
    }

    pub fn dismiss_error(&self) {
        self.lock().dismiss_error();
    }
}
