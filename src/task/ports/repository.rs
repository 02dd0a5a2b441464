//! Repository port for owner-scoped task persistence.

use crate::session::domain::UserId;
use crate::task::domain::{NewTask, Task, TaskId, TaskName, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation is scoped by the owning user. Rows owned by somebody else
/// behave exactly like rows that do not exist.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns all tasks owned by `owner`, ascending by creation time.
    async fn list_for_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Inserts a task and returns the stored row with its assigned id and
    /// creation timestamp.
    ///
    /// When the payload carries an idempotency key that the same owner has
    /// already used, the previously stored task is returned and nothing is
    /// inserted.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Replaces the name of one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with `id` is
    /// owned by `owner`.
    async fn update_name(
        &self,
        owner: UserId,
        id: TaskId,
        name: &TaskName,
    ) -> TaskRepositoryResult<()>;

    /// Replaces the status of one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with `id` is
    /// owned by `owner`.
    async fn update_status(
        &self,
        owner: UserId,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<()>;

    /// Deletes one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with `id` is
    /// owned by `owner`.
    async fn delete(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found for the requesting owner.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
