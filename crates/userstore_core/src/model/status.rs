//! Outcome vocabulary for mutating user operations.

use crate::model::user::UserId;
use crate::repo::user_repo::RepoError;
use std::fmt::{Display, Formatter};

pub const DATA_INSERT_MSG: &str = "User created successfully.";
pub const DATA_UPDATE_MSG: &str = "User updated successfully.";
pub const DATA_DELETE_MSG: &str = "User deleted successfully.";
pub const DATA_ABSENT_MSG: &str = "No data found.";

/// Result of a create/update/delete call, rendered through `Display`.
///
/// `Failed` carries the typed cause; its display text is the user-safe
/// message for the error category, never raw storage output.
#[derive(Debug)]
pub enum StatusMessage {
    Inserted(UserId),
    Updated,
    Deleted,
    Absent,
    Failed(RepoError),
}

impl StatusMessage {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Inserted(_) | Self::Updated | Self::Deleted)
    }
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inserted(_) => f.write_str(DATA_INSERT_MSG),
            Self::Updated => f.write_str(DATA_UPDATE_MSG),
            Self::Deleted => f.write_str(DATA_DELETE_MSG),
            Self::Absent => f.write_str(DATA_ABSENT_MSG),
            Self::Failed(err) => f.write_str(err.user_message()),
        }
    }
}

impl From<RepoError> for StatusMessage {
    fn from(value: RepoError) -> Self {
        Self::Failed(value)
    }
}
