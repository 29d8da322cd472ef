//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, mapping and repository calls.
//! - Render outcomes as display strings for presentation layers.

pub mod user_service;
