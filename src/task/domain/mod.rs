//! Domain model for user-owned tasks.
//!
//! Tasks carry a name and one of three fixed statuses. Identifiers and
//! creation timestamps are assigned by the repository, so the domain only
//! validates what the user supplies.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{IdempotencyKey, TaskId};
pub use task::{NewTask, PersistedTaskData, Task, TaskName, TaskStatus};
