//! In-memory repository for task tests and local runs.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::session::domain::UserId;
use crate::task::{
    domain::{
        IdempotencyKey, NewTask, PersistedTaskData, Task, TaskId, TaskName, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Rows are kept in insertion order so tasks created within the same clock
/// tick still list in a stable order.
pub struct InMemoryTaskRepository<C = DefaultClock> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    rows: Vec<Task>,
    idempotency_index: HashMap<(UserId, IdempotencyKey), TaskId>,
}

impl InMemoryTaskState {
    fn find_owned_mut(&mut self, owner: UserId, id: TaskId) -> TaskRepositoryResult<&mut Task> {
        self.rows
            .iter_mut()
            .find(|task| task.id() == id && task.owner_id() == owner)
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemoryTaskRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository that stamps rows with `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock: Arc::new(clock),
        }
    }

    /// Returns the number of stored rows across all owners.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn row_count(&self) -> TaskRepositoryResult<usize> {
        Ok(self.read()?.rows.len())
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl<C> Clone for InMemoryTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryTaskRepository<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskRepository")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn list_for_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .rows
            .iter()
            .filter(|task| task.owner_id() == owner)
            .cloned()
            .collect();
        tasks.sort_by_key(Task::created_at);
        Ok(tasks)
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;

        if let Some(key) = task.idempotency_key {
            let existing = state
                .idempotency_index
                .get(&(task.owner_id, key))
                .and_then(|id| state.rows.iter().find(|row| row.id() == *id))
                .cloned();
            if let Some(stored) = existing {
                return Ok(stored);
            }
        }

        let stored = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            name: task.name.clone(),
            status: task.status,
            owner_id: task.owner_id,
            created_at: self.clock.utc(),
        });
        if let Some(key) = task.idempotency_key {
            state
                .idempotency_index
                .insert((task.owner_id, key), stored.id());
        }
        state.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update_name(
        &self,
        owner: UserId,
        id: TaskId,
        name: &TaskName,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.find_owned_mut(owner, id)?.rename(name.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        owner: UserId,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.find_owned_mut(owner, id)?.move_to(status);
        Ok(())
    }

    async fn delete(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let position = state
            .rows
            .iter()
            .position(|task| task.id() == id && task.owner_id() == owner)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.rows.remove(position);
        state.idempotency_index.retain(|_, stored| *stored != id);
        Ok(())
    }
}
