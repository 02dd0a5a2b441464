//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task label.
    pub task_name: String,
    /// Board status.
    pub status: String,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Optional idempotency key.
    pub idempotency_key: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records. `created_at` is left to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task label.
    pub task_name: String,
    /// Board status.
    pub status: String,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Optional idempotency key.
    pub idempotency_key: Option<uuid::Uuid>,
}
