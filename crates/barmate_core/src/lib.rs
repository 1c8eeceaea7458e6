//! Core domain logic for BarMate.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod seed;
pub mod service;
pub mod session;
pub mod timer;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::drink::{Drink, DrinkId, DrinkValidationError, Ingredient, NewDrink};
pub use repo::drink_repo::{DrinkRepository, RepoError, RepoResult, SqliteDrinkRepository};
pub use search::filter::{like_pattern, search_drinks, DrinkFilter};
pub use seed::default_catalog;
pub use service::catalog_service::CatalogService;
pub use session::{CatalogSession, Screen};
pub use timer::shake_timer::{ShakeTimer, TimerAction, TimerEvent, TimerPhase, TimerSnapshot};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
