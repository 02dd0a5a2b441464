//! Partitioning of the task list into the three board columns.

use crate::task::domain::{Task, TaskStatus};

/// One board column and the tasks currently in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    /// Status shared by every task in the column.
    pub status: TaskStatus,
    /// Tasks in list order.
    pub tasks: Vec<Task>,
}

/// Groups `tasks` into one column per status, in board order.
///
/// Tasks keep their relative order from `tasks` within each column. Empty
/// columns are still returned.
#[must_use]
pub fn group_by_status(tasks: &[Task]) -> Vec<BoardColumn> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| BoardColumn {
            status,
            tasks: tasks
                .iter()
                .filter(|task| task.status() == status)
                .cloned()
                .collect(),
        })
        .collect()
}
