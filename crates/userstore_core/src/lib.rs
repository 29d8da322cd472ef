//! Core data access for the user store.
//!
//! Field maps flow through validation and mapping into a transactional
//! SQLite repository; the service renders every outcome as text.

pub mod config;
pub mod db;
pub mod input;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use input::mapper::{map_user_data, MapError};
pub use input::validator::{format_errors, validate_user_data, Operation};
pub use input::{field_map, ErrorMap, FieldMap};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::status::{
    StatusMessage, DATA_ABSENT_MSG, DATA_DELETE_MSG, DATA_INSERT_MSG, DATA_UPDATE_MSG,
};
pub use model::user::{User, UserDraft, UserId};
pub use repo::user_repo::{ErrorKind, RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
