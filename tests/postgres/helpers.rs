//! Shared helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use eyre::WrapErr;
use pg_embedded_setup_unpriv::TestCluster;
use taskboard::task::adapters::postgres::{PostgresTaskRepository, build_pool};
use tokio::runtime::{Builder, Runtime};
use uuid::Uuid;

/// SQL for the `tasks` table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-10-16-000000_create_tasks/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Creates a tokio runtime for driving the async repository from sync tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> eyre::Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_TASKS_SQL)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// A migrated database private to one test. Dropped with the value.
///
/// Declare it before anything that holds connections to it, so those are
/// closed by the time the database is dropped.
pub struct TaskDatabase {
    cluster: &'static TestCluster,
    name: String,
}

impl TaskDatabase {
    /// Clones the template into a fresh database whose name starts with
    /// `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or the clone cannot be created.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let name = format!("{prefix}_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("create {name}: {e}"))?;
        Ok(Self { cluster, name })
    }

    /// Returns the connection URL of this database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.connection().database_url(&self.name)
    }

    /// Builds a repository over a single-connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot connect.
    pub fn repository(&self) -> eyre::Result<PostgresTaskRepository> {
        let pool = build_pool(&self.url(), 1).wrap_err("build pool")?;
        Ok(PostgresTaskRepository::new(pool))
    }

    /// Opens a direct connection for seeding rows the repository cannot
    /// write itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub fn connect(&self) -> eyre::Result<PgConnection> {
        PgConnection::establish(&self.url()).wrap_err("connect")
    }
}

impl Drop for TaskDatabase {
    #[expect(
        clippy::print_stderr,
        reason = "Test cleanup warnings are informational"
    )]
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.name);
        }
    }
}
