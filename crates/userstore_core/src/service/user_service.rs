//! User use-case service.
//!
//! # Responsibility
//! - Run validation before any repository call and report rejected input.
//! - Map checked input to drafts and delegate persistence to the repository.
//! - Format read results and statuses as outward-facing text.
//!
//! # Invariants
//! - Invalid input never reaches the repository.
//! - No call panics or returns an error past this boundary; every path
//!   resolves to a string.
//! - Calls are independent; the service keeps no state between them.

use crate::input::mapper::map_user_data;
use crate::input::validator::{format_errors, validate_user_data, Operation};
use crate::input::{ErrorMap, FieldMap, FIELD_ID};
use crate::model::status::DATA_ABSENT_MSG;
use crate::model::user::{UserDraft, UserId};
use crate::repo::user_repo::UserRepository;
use log::info;

const USERS_HEADER: &str = "USERS:";
const USER_PREFIX: &str = "User: ";

/// Text-oriented facade over a `UserRepository`.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a user from `first_name` and `email`.
    ///
    /// Returns the insert status, a validation report, or a user-safe
    /// storage error message.
    pub fn create_user(&self, fields: &FieldMap) -> String {
        let draft = match checked_draft(fields, Operation::Create) {
            Ok(draft) => draft,
            Err(report) => return report,
        };

        match self.repo.create(&draft) {
            Ok(status) => status.to_string(),
            Err(err) => err.user_message().to_string(),
        }
    }

    /// Lists all users as a 1-based numbered listing in insertion order.
    ///
    /// An empty store and a failed read both render `DATA_ABSENT_MSG`.
    pub fn read_users(&self) -> String {
        match self.repo.read_all() {
            Some(users) if !users.is_empty() => {
                let mut listing = String::from(USERS_HEADER);
                for (index, user) in users.iter().enumerate() {
                    listing.push_str(&format!("\n{}) {user}", index + 1));
                }
                listing
            }
            _ => DATA_ABSENT_MSG.to_string(),
        }
    }

    /// Replaces name and email of the user identified by `id`.
    pub fn update_user(&self, fields: &FieldMap) -> String {
        match checked_draft(fields, Operation::Update) {
            Ok(draft) => self.repo.update(&draft).to_string(),
            Err(report) => report,
        }
    }

    /// Deletes the user identified by `id`.
    pub fn delete_user(&self, fields: &FieldMap) -> String {
        match checked_draft(fields, Operation::Delete).and_then(|draft| required_id(&draft)) {
            Ok(id) => self.repo.delete(id).to_string(),
            Err(report) => report,
        }
    }

    /// Renders the user identified by `id`, or `DATA_ABSENT_MSG`.
    pub fn read_user_by_id(&self, fields: &FieldMap) -> String {
        let id = match checked_draft(fields, Operation::ReadById)
            .and_then(|draft| required_id(&draft))
        {
            Ok(id) => id,
            Err(report) => return report,
        };

        match self.repo.read_by_id(id) {
            Some(user) => format!("{USER_PREFIX}{user}"),
            None => DATA_ABSENT_MSG.to_string(),
        }
    }
}

fn checked_draft(fields: &FieldMap, operation: Operation) -> Result<UserDraft, String> {
    let errors = validate_user_data(fields, operation);
    if !errors.is_empty() {
        // Field names only; values may carry personal data.
        info!(
            "event=user_validate module=service status=rejected op={} fields={}",
            operation.as_str(),
            errors.keys().map(String::as_str).collect::<Vec<_>>().join(",")
        );
        return Err(format_errors(&errors));
    }

    map_user_data(fields).map_err(|err| single_error(FIELD_ID, err.to_string()))
}

fn required_id(draft: &UserDraft) -> Result<UserId, String> {
    draft
        .id
        .ok_or_else(|| single_error(FIELD_ID, "ID is required".to_string()))
}

fn single_error(field: &str, message: String) -> String {
    let mut errors = ErrorMap::new();
    errors.insert(field.to_string(), message);
    format_errors(&errors)
}
