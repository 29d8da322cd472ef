//! User domain model.
//!
//! # Responsibility
//! - Define the persisted `User` record and the mapper's partial `UserDraft`.
//! - Define the status vocabulary returned by mutating repository calls.
//!
//! # Invariants
//! - A persisted `User` is always fully populated.
//! - Absence in a `UserDraft` means "not provided", never "empty".

pub mod status;
pub mod user;
