//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database location and logging settings for front ends.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Log level is normalized before it reaches the logging layer.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "BARMATE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "BARMATE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "BARMATE_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "barmate.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{LOG_LEVEL_ENV}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Logging stays disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);
        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };
        let log_dir = non_blank(LOG_DIR_ENV).map(PathBuf::from);

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
