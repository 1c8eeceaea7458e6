//! Flutter bridge crate for the BarMate mobile shell.

pub mod api;
