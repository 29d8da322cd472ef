//! Runtime configuration for the user store.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Open a migrated connection and start logging from one config value.
//!
//! # Invariants
//! - Empty environment values are treated as unset.
//! - Without `USERSTORE_DB_PATH` the store is in-memory.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::logging::{default_log_level, init_logging, LoggingError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "USERSTORE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "USERSTORE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "USERSTORE_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Db(DbError),
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<DbError> for ConfigError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

/// Where the store lives and how it logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite file; `None` selects a fresh in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Directory for rotating log files; `None` leaves logging untouched.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Reads `USERSTORE_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: non_empty(ENV_DB_PATH).map(PathBuf::from),
            log_level: non_empty(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: non_empty(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    /// Opens the configured database with migrations applied.
    pub fn open_connection(&self) -> Result<Connection, ConfigError> {
        let conn = match &self.db_path {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        Ok(conn)
    }

    /// Starts file logging when `log_dir` is set. Returns whether it did.
    pub fn init_logging(&self) -> Result<bool, ConfigError> {
        match &self.log_dir {
            Some(dir) => {
                init_logging(&self.log_level, dir)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
