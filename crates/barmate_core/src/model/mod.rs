//! Domain model for the drink catalog.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every persisted recipe is identified by a storage-assigned `DrinkId`.
//! - Deletion is a hard delete of catalog rows; there are no tombstones.

pub mod drink;
