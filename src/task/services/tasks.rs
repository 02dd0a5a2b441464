//! Session-scoped task operations.
//!
//! Every operation verifies the caller's session with the session store
//! before touching the repository, and every successful mutation returns a
//! full re-read of the owner's tasks rather than a patched copy.

use crate::session::{
    domain::{AuthError, Session, UserId},
    ports::SessionStore,
};
use crate::task::{
    domain::{IdempotencyKey, NewTask, Task, TaskDomainError, TaskId, TaskName, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    status: TaskStatus,
    idempotency_key: Option<IdempotencyKey>,
}

impl CreateTaskRequest {
    /// Creates a request with the user-entered name and target column.
    #[must_use]
    pub fn new(name: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            name: name.into(),
            status,
            idempotency_key: None,
        }
    }

    /// Attaches a key so repeated submissions create at most one task.
    #[must_use]
    pub const fn with_idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No live session accompanied the request.
    #[error("user not found: sign in to continue")]
    Unauthenticated,
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The session store failed while verifying the session.
    #[error(transparent)]
    Session(#[from] AuthError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// User-scoped task CRUD service.
pub struct TaskService<R, S>
where
    R: TaskRepository,
    S: SessionStore,
{
    repository: Arc<R>,
    sessions: Arc<S>,
}

impl<R, S> Clone for TaskService<R, S>
where
    R: TaskRepository,
    S: SessionStore,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<R, S> TaskService<R, S>
where
    R: TaskRepository,
    S: SessionStore,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, sessions: Arc<S>) -> Self {
        Self {
            repository,
            sessions,
        }
    }

    /// Returns the session store backing this service.
    #[must_use]
    pub const fn sessions(&self) -> &Arc<S> {
        &self.sessions
    }

    /// Lists the session owner's tasks, ascending by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthenticated`] when the session is not
    /// live, or [`TaskServiceError::Repository`] when the read fails.
    #[tracing::instrument(skip_all, fields(user_id = %session.user_id()))]
    pub async fn list_tasks(&self, session: &Session) -> TaskServiceResult<Vec<Task>> {
        let owner = self.authorize(session).await?;
        self.reload(owner).await
    }

    /// Creates a task owned by the session user and returns the refreshed
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for an empty name,
    /// [`TaskServiceError::Unauthenticated`] when the session is not live,
    /// or [`TaskServiceError::Repository`] when persistence fails.
    #[tracing::instrument(
        skip_all,
        fields(user_id = %session.user_id(), status = %request.status)
    )]
    pub async fn create_task(
        &self,
        session: &Session,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Vec<Task>> {
        let name = TaskName::new(request.name)?;
        let owner = self.authorize(session).await?;
        let created = self
            .repository
            .insert(&NewTask {
                name,
                status: request.status,
                owner_id: owner,
                idempotency_key: request.idempotency_key,
            })
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "task insert failed"))?;
        tracing::info!(task_id = %created.id(), "task created");
        self.reload(owner).await
    }

    /// Renames a task and returns the refreshed list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for an empty name,
    /// [`TaskServiceError::Unauthenticated`] when the session is not live,
    /// or [`TaskServiceError::Repository`] when the task is missing or the
    /// update fails.
    #[tracing::instrument(skip_all, fields(user_id = %session.user_id(), task_id = %id))]
    pub async fn rename_task(
        &self,
        session: &Session,
        id: TaskId,
        new_name: impl Into<String> + Send,
    ) -> TaskServiceResult<Vec<Task>> {
        let name = TaskName::new(new_name)?;
        let owner = self.authorize(session).await?;
        self.repository
            .update_name(owner, id, &name)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "task rename failed"))?;
        tracing::debug!("task renamed");
        self.reload(owner).await
    }

    /// Moves a task to another status column and returns the refreshed list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthenticated`] when the session is not
    /// live, or [`TaskServiceError::Repository`] when the task is missing or
    /// the update fails.
    #[tracing::instrument(
        skip_all,
        fields(user_id = %session.user_id(), task_id = %id, status = %new_status)
    )]
    pub async fn move_task(
        &self,
        session: &Session,
        id: TaskId,
        new_status: TaskStatus,
    ) -> TaskServiceResult<Vec<Task>> {
        let owner = self.authorize(session).await?;
        self.repository
            .update_status(owner, id, new_status)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "task move failed"))?;
        tracing::debug!("task moved");
        self.reload(owner).await
    }

    /// Deletes a task and returns the refreshed list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthenticated`] when the session is not
    /// live, or [`TaskServiceError::Repository`] when the task is missing or
    /// the delete fails.
    #[tracing::instrument(skip_all, fields(user_id = %session.user_id(), task_id = %id))]
    pub async fn delete_task(&self, session: &Session, id: TaskId) -> TaskServiceResult<Vec<Task>> {
        let owner = self.authorize(session).await?;
        self.repository
            .delete(owner, id)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "task delete failed"))?;
        tracing::info!("task deleted");
        self.reload(owner).await
    }

    async fn authorize(&self, session: &Session) -> TaskServiceResult<UserId> {
        self.sessions.verify(session).await?.ok_or_else(|| {
            tracing::warn!("rejected request without a live session");
            TaskServiceError::Unauthenticated
        })
    }

    async fn reload(&self, owner: UserId) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_for_owner(owner).await?)
    }
}
