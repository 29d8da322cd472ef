//! Raw text input handling for user operations.
//!
//! # Responsibility
//! - Check caller-provided field maps before anything touches storage.
//! - Convert checked field maps into `UserDraft` values.
//!
//! # Invariants
//! - Validation is pure: no I/O, no panics, always returns an error map.

use std::collections::BTreeMap;

pub mod mapper;
pub mod validator;

/// Raw caller input, keyed by field name (`id`, `first_name`, `email`).
pub type FieldMap = BTreeMap<String, String>;

/// Field name to human-readable error message. Empty means valid.
pub type ErrorMap = BTreeMap<String, String>;

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "first_name";
pub const FIELD_EMAIL: &str = "email";

/// Builds a `FieldMap` from borrowed pairs.
///
/// ```
/// let fields = userstore_core::field_map([("first_name", "Ann"), ("email", "ann@x.io")]);
/// assert_eq!(fields.len(), 2);
/// ```
pub fn field_map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> FieldMap {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
