//! Application configuration loaded from `TASKBOARD_*` environment variables.

use serde::Deserialize;
use thiserror::Error;

use crate::board::BoardSettings;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "TASKBOARD";

const DEFAULT_POOL_MAX_SIZE: u32 = 8;
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_AVATAR_URL: &str = "https://www.gravatar.com/avatar/?d=mp";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    /// The connection pool must hold at least one connection.
    #[error("pool_max_size must be greater than zero")]
    InvalidPoolSize,
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string. Required only for the database adapter.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Maximum connections held by the pool.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
    /// Fallback `tracing` filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Avatar shown when a profile has none.
    #[serde(default = "default_avatar_url")]
    pub default_avatar_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            log_filter: default_log_filter(),
            default_avatar_url: default_avatar_url(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value cannot be parsed or fails
    /// validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Loads configuration from explicit `TASKBOARD_*` variables, ignoring
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value cannot be parsed or fails
    /// validation.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::load(Some(source))
    }

    fn load(source: Option<config::Map<String, String>>) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(source),
            )
            .build()?;
        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.pool_max_size == 0 {
            return Err(ConfigError::InvalidPoolSize);
        }
        Ok(self)
    }

    /// Returns the board presentation settings.
    #[must_use]
    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            default_avatar_url: self.default_avatar_url.clone(),
        }
    }
}

const fn default_pool_max_size() -> u32 {
    DEFAULT_POOL_MAX_SIZE
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

fn default_avatar_url() -> String {
    DEFAULT_AVATAR_URL.to_owned()
}
