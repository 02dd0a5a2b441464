//! Shared world state for kanban board BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskboard::board::{BoardController, BoardSettings, DropOutcome};
use taskboard::session::adapters::memory::{InMemoryProfileDirectory, InMemorySessionStore};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository, domain::TaskId, services::TaskService,
};

/// Board type used by the BDD world.
pub type TestBoard =
    BoardController<InMemoryTaskRepository, InMemorySessionStore, InMemoryProfileDirectory>;

/// Scenario world for kanban board behaviour tests.
pub struct BoardWorld {
    pub sessions: Arc<InMemorySessionStore>,
    pub board: TestBoard,
    pub last_drop: Option<DropOutcome>,
}

impl BoardWorld {
    /// Creates a world with no accounts and a closed board.
    #[must_use]
    pub fn new() -> Self {
        let sessions = Arc::new(InMemorySessionStore::new());
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&sessions),
        );
        let board = BoardController::new(
            service,
            Arc::new(InMemoryProfileDirectory::new()),
            BoardSettings {
                default_avatar_url: "https://example.com/avatar.png".to_owned(),
            },
        );

        Self {
            sessions,
            board,
            last_drop: None,
        }
    }

    /// Finds the id of the task named `name` on the board.
    ///
    /// # Errors
    ///
    /// Returns an error if no task on the board has that name.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.board
            .tasks()
            .iter()
            .find(|task| task.name().as_str() == name)
            .map(|task| task.id())
            .ok_or_else(|| eyre::eyre!("no task named {name:?} on the board"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
