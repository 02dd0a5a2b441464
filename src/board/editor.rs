//! Inline form state: the per-column add composer and the row editor.

use crate::task::domain::{IdempotencyKey, Task, TaskId, TaskStatus};

/// Display state of one task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// Showing the task name.
    Viewing,
    /// Showing an edit field for the task name.
    Editing,
}

/// Single-line "add task" form scoped to one column.
///
/// Only one column can have the composer open at a time. Each draft carries
/// an idempotency key. The key survives failed submits of the same text on
/// the same column, so resubmitting never inserts twice. Editing the text,
/// cancelling, or a successful submit replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddComposer {
    column: Option<TaskStatus>,
    draft: String,
    key: IdempotencyKey,
}

impl Default for AddComposer {
    fn default() -> Self {
        Self {
            column: None,
            draft: String::new(),
            key: IdempotencyKey::new(),
        }
    }
}

impl AddComposer {
    /// Opens the composer on `column`. Returns `false` if it is already open.
    pub const fn open(&mut self, column: TaskStatus) -> bool {
        if self.column.is_some() {
            return false;
        }
        self.column = Some(column);
        true
    }

    /// Replaces the draft text, rotating the key when the text changes.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        let next = text.into();
        if next != self.draft {
            self.draft = next;
            self.rotate_key();
        }
    }

    /// Closes the composer, discards the draft, and rotates the key.
    pub fn cancel(&mut self) {
        self.column = None;
        self.draft.clear();
        self.rotate_key();
    }

    /// Closes the composer after a successful submit.
    pub fn complete(&mut self) {
        self.cancel();
    }

    /// Returns the column the composer is open on.
    #[must_use]
    pub const fn column(&self) -> Option<TaskStatus> {
        self.column
    }

    /// Returns the current draft text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns the key for the current draft.
    #[must_use]
    pub const fn key(&self) -> IdempotencyKey {
        self.key
    }

    /// Returns the submission for a non-blank draft on an open column.
    #[must_use]
    pub fn submission(&self) -> Option<(TaskStatus, String)> {
        let column = self.column?;
        if self.draft.trim().is_empty() {
            return None;
        }
        Some((column, self.draft.clone()))
    }

    fn rotate_key(&mut self) {
        self.key = IdempotencyKey::new();
    }
}

/// The row currently being renamed, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowEditor {
    editing: Option<(TaskId, String)>,
}

impl RowEditor {
    /// Starts editing `task`, pre-filling the draft with its current name.
    ///
    /// Any other row being edited is abandoned.
    pub fn begin(&mut self, task: &Task) {
        self.editing = Some((task.id(), task.name().as_str().to_owned()));
    }

    /// Replaces the draft text. Ignored when no row is being edited.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some((_, draft)) = self.editing.as_mut() {
            *draft = text.into();
        }
    }

    /// Returns the row to viewing without saving.
    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Returns the task being edited and its draft.
    #[must_use]
    pub fn current(&self) -> Option<(TaskId, &str)> {
        self.editing
            .as_ref()
            .map(|(id, draft)| (*id, draft.as_str()))
    }

    /// Returns the display state of the row for `id`.
    #[must_use]
    pub fn state_of(&self, id: TaskId) -> RowState {
        match &self.editing {
            Some((editing, _)) if *editing == id => RowState::Editing,
            _ => RowState::Viewing,
        }
    }
}
