//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::session::domain::UserId;
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskName, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<TaskPgPool, PoolError> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    #[tracing::instrument(skip(self))]
    async fn list_for_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    #[tracing::instrument(skip(self, task), fields(owner = %task.owner_id, status = %task.status))]
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            let inserted = diesel::insert_into(tasks::table)
                .values(&new_row)
                .on_conflict((tasks::owner_id, tasks::idempotency_key))
                .do_nothing()
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            if let Some(row) = inserted {
                return row_to_task(row);
            }

            // The insert only yields no row when the idempotency key collided.
            let existing = tasks::table
                .filter(tasks::owner_id.eq(new_row.owner_id))
                .filter(tasks::idempotency_key.eq(new_row.idempotency_key))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            tracing::debug!(task_id = %existing.id, "idempotent insert returned existing row");
            row_to_task(existing)
        })
        .await
    }

    #[tracing::instrument(skip(self, name))]
    async fn update_name(
        &self,
        owner: UserId,
        id: TaskId,
        name: &TaskName,
    ) -> TaskRepositoryResult<()> {
        let new_name = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let updated = diesel::update(owned_task(owner, id))
                .set(tasks::task_name.eq(new_name))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            require_row(updated, id)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(
        &self,
        owner: UserId,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(owned_task(owner, id))
                .set(tasks::status.eq(status.as_str()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            require_row(updated, id)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(owned_task(owner, id))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            require_row(deleted, id)
        })
        .await
    }
}

type OwnedTaskFilter = diesel::dsl::Filter<
    diesel::dsl::Filter<tasks::table, diesel::dsl::Eq<tasks::id, uuid::Uuid>>,
    diesel::dsl::Eq<tasks::owner_id, uuid::Uuid>,
>;

fn owned_task(owner: UserId, id: TaskId) -> OwnedTaskFilter {
    tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .filter(tasks::owner_id.eq(owner.into_inner()))
}

const fn require_row(affected: usize, id: TaskId) -> TaskRepositoryResult<()> {
    if affected == 0 {
        return Err(TaskRepositoryError::NotFound(id));
    }
    Ok(())
}

pub(super) fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        id: TaskId::new().into_inner(),
        task_name: task.name.as_str().to_owned(),
        status: task.status.as_str().to_owned(),
        owner_id: task.owner_id.into_inner(),
        idempotency_key: task.idempotency_key.map(|key| key.into_inner()),
    }
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        task_name,
        status: persisted_status,
        owner_id,
        idempotency_key: _,
        created_at,
    } = row;

    let name = TaskName::new(task_name).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        name,
        status,
        owner_id: UserId::from_uuid(owner_id),
        created_at,
    }))
}
