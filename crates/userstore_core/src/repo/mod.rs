//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the user data access contract.
//! - Isolate SQLite statements from service orchestration.
//!
//! # Invariants
//! - Every repository call runs in its own transaction, committed or rolled
//!   back before the call returns.
//! - Update/delete confirm existence by id before mutating.

pub mod transaction;
pub mod user_repo;
