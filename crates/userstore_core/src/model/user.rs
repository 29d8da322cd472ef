//! User records.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier of a persisted user.
pub type UserId = i64;

/// Fully populated row of the `users` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by storage on insert; never reused.
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User{{id={}, name={}, email={}}}",
            self.id, self.name, self.email
        )
    }
}

/// User attributes as provided by a caller, before persistence.
///
/// Each field is `None` when the corresponding input key was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub id: Option<UserId>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserDraft {
    /// Builds a draft for insertion, where the id is left to storage.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Builds a full-replace draft targeting an existing row.
    pub fn with_id(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, email)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{User, UserDraft};

    #[test]
    fn display_matches_listing_format() {
        let user = User::new(1, "Ann", "ann@x.io");
        assert_eq!(user.to_string(), "User{id=1, name=Ann, email=ann@x.io}");
    }

    #[test]
    fn default_draft_has_nothing_provided() {
        let draft = UserDraft::default();
        assert_eq!(draft.id, None);
        assert_eq!(draft.name, None);
        assert_eq!(draft.email, None);
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let user = User::new(3, "Cid", "cid@x.io");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 3, "name": "Cid", "email": "cid@x.io" })
        );
        assert_eq!(serde_json::from_value::<User>(json).unwrap(), user);
    }
}
