//! Drink list search entry points.
//!
//! # Responsibility
//! - Expose name search backed by SQLite `LIKE` plus the favourite toggle.
//! - Keep filter semantics inside core so every front end agrees.

pub mod filter;
