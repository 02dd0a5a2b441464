//! Wiring of configured adapters.

use diesel::r2d2::PoolError;
use thiserror::Error;

use crate::config::AppConfig;
use crate::task::adapters::postgres::{PostgresTaskRepository, build_pool};

/// Errors raised while connecting adapters.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// `TASKBOARD_DATABASE_URL` is not set.
    #[error("database_url is not configured")]
    MissingDatabaseUrl,
    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Builds the PostgreSQL task repository from configuration.
///
/// # Errors
///
/// Returns [`BootstrapError::MissingDatabaseUrl`] when no URL is configured,
/// or [`BootstrapError::Pool`] when the pool cannot connect.
#[tracing::instrument(skip_all, fields(pool_max_size = config.pool_max_size))]
pub fn connect_task_repository(
    config: &AppConfig,
) -> Result<PostgresTaskRepository, BootstrapError> {
    let url = config
        .database_url
        .as_deref()
        .ok_or(BootstrapError::MissingDatabaseUrl)?;
    let pool = build_pool(url, config.pool_max_size)?;
    tracing::info!("task repository connected");
    Ok(PostgresTaskRepository::new(pool))
}
