use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// What a single task row is doing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowState {
    /// Default state for every loaded task.
    Viewing,
    /// The row holds a local draft, separate from the last-fetched text.
    Editing { draft: String },
    /// A delete is in flight or settling. The row still renders (with its
    /// exit transition) and ignores further delete requests.
    Deleting,
}

/// What the list area shows as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// The initial fetch has not settled yet.
    Loading,
    /// The fetch settled and the store is empty.
    Empty,
    /// Tasks are available to render.
    List,
}

/// The local draft for the row currently being edited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDraft {
    pub id: i64,
    pub text: String,
}

/// Task-list UI state.
///
/// Everything the page shows is a function of this value: the fetched task
/// collection, the initial loading flag, the current error banner, the set
/// of rows mid-deletion, and at most one edit draft. All methods are
/// synchronous transitions; I/O and timing live in the controller.
///
/// The fetched collection is a read-through copy of the store and may be
/// stale until the next refresh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskListState {
    tasks: Vec<Task>,
    /// True until the initial fetch settles; never set again after that.
    loading: bool,
    /// Last surfaced failure, shown as a dismissible banner.
    error: Option<String>,
    /// Ids with a delete in flight, tracked independently per row.
    deleting: HashSet<i64>,
    /// At most one row is in the editing state at a time.
    editing: Option<EditDraft>,
}

impl TaskListState {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            loading: true,
            error: None,
            deleting: HashSet::new(),
            editing: None,
        }
    }

    // ============================================================
    // Accessors
    // ============================================================

    /// The last-fetched collection, including rows mid-deletion.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(&id)
    }

    pub fn row_state(&self, id: i64) -> RowState {
        if self.deleting.contains(&id) {
            RowState::Deleting
        } else if let Some(draft) = self.editing.as_ref().filter(|d| d.id == id) {
            RowState::Editing {
                draft: draft.text.clone(),
            }
        } else {
            RowState::Viewing
        }
    }

    /// The loading indicator and the empty placeholder are mutually
    /// exclusive: an empty store only reads as Empty once loading is over.
    pub fn view(&self) -> ViewMode {
        if self.loading {
            ViewMode::Loading
        } else if self.tasks.is_empty() {
            ViewMode::Empty
        } else {
            ViewMode::List
        }
    }

    // ============================================================
    // Fetch transitions
    // ============================================================

    /// A list fetch is starting. Clears the error banner.
    pub fn list_started(&mut self) {
        self.error = None;
    }

    /// A list fetch settled with data. Replaces the local collection and,
    /// if the edited row no longer exists, drops the draft.
    pub fn list_succeeded(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.loading = false;
        if let Some(draft) = &self.editing {
            if !self.tasks.iter().any(|t| t.id == draft.id) {
                self.editing = None;
            }
        }
    }

    /// A list fetch failed. The stale collection stays rendered.
    pub fn list_failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.surface_error(message);
    }

    // ============================================================
    // Edit transitions
    // ============================================================

    /// Enter editing on a row, seeding the draft from the fetched text.
    /// Refused while the row is mid-deletion or unknown.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        if self.deleting.contains(&id) {
            return false;
        }
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return false;
        };
        self.editing = Some(EditDraft {
            id,
            text: task.text.clone(),
        });
        true
    }

    /// Replace the current draft text. No-op when nothing is being edited.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(draft) = &mut self.editing {
            draft.text = text.into();
        }
    }

    /// Abandon the draft without persisting anything.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// The server confirmed the update; the row returns to viewing.
    pub fn edit_saved(&mut self) {
        self.editing = None;
    }

    // ============================================================
    // Delete transitions
    // ============================================================

    /// Mark a row as deleting. Returns false when a delete for this id is
    /// already in flight, in which case the caller must not issue another
    /// request. Deleting a row that was being edited drops its draft.
    pub fn request_delete(&mut self, id: i64) -> bool {
        if self.deleting.contains(&id) {
            return false;
        }
        if self.editing.as_ref().is_some_and(|d| d.id == id) {
            self.editing = None;
        }
        self.deleting.insert(id);
        true
    }

    /// The delete failed. The row reverts to viewing and the failure is
    /// surfaced; other in-flight deletions are untouched.
    pub fn delete_failed(&mut self, id: i64, message: impl Into<String>) {
        self.deleting.remove(&id);
        self.surface_error(message);
    }

    /// The delete succeeded and the exit transition has elapsed. Removes
    /// the row locally without a refetch.
    pub fn delete_settled(&mut self, id: i64) {
        self.deleting.remove(&id);
        self.tasks.retain(|t| t.id != id);
    }

    // ============================================================
    // Error banner
    // ============================================================

    pub fn surface_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

impl Default for TaskListState {
    fn default() -> Self {
        Self::new()
    }
}
