//! Drag-and-drop events normalized from whatever gesture produced them.

use crate::task::domain::{ParseTaskStatusError, TaskId, TaskStatus};
use thiserror::Error;

/// A completed drag gesture.
///
/// `destination` is `None` when the item was released outside every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    /// Dragged task.
    pub task_id: TaskId,
    /// Column the drag started in.
    pub source: TaskStatus,
    /// Column the item was released over, if any.
    pub destination: Option<TaskStatus>,
}

/// What a drop asks the board to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Move the task to another column.
    Move {
        /// Task to move.
        task_id: TaskId,
        /// New status.
        to: TaskStatus,
    },
    /// Released within its own column. Order inside a column is not stored.
    SameColumn,
    /// Released outside every column.
    Cancelled,
}

/// Errors raised while normalizing a raw drop event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DropEventError {
    /// The dragged item id is not a task id.
    #[error("invalid task id: {0}")]
    InvalidTaskId(String),
    /// A column id does not name one of the three columns.
    #[error(transparent)]
    UnknownColumn(#[from] ParseTaskStatusError),
}

impl DropEvent {
    /// Creates a drop event from typed values.
    #[must_use]
    pub const fn new(task_id: TaskId, source: TaskStatus, destination: Option<TaskStatus>) -> Self {
        Self {
            task_id,
            source,
            destination,
        }
    }

    /// Normalizes string ids from a UI toolkit into a drop event.
    ///
    /// # Errors
    ///
    /// Returns [`DropEventError`] when the item id is not a task id or a
    /// column id is unknown.
    pub fn parse(
        item_id: &str,
        source: &str,
        destination: Option<&str>,
    ) -> Result<Self, DropEventError> {
        let task_id = item_id
            .parse::<TaskId>()
            .map_err(|_| DropEventError::InvalidTaskId(item_id.to_owned()))?;
        let source_status = TaskStatus::try_from(source)?;
        let destination_status = destination.map(TaskStatus::try_from).transpose()?;
        Ok(Self::new(task_id, source_status, destination_status))
    }

    /// Decides what the drop means for the board.
    #[must_use]
    pub fn resolve(&self) -> DropOutcome {
        match self.destination {
            None => DropOutcome::Cancelled,
            Some(to) if to == self.source => DropOutcome::SameColumn,
            Some(to) => DropOutcome::Move {
                task_id: self.task_id,
                to,
            },
        }
    }
}
