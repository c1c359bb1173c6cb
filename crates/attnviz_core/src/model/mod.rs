//! Domain model for persisted text records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `TextId`.
//! - Deletion is a hard delete; ids are never reused.

pub mod text;
