//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level catalog and shaker functions to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` and a message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Catalog calls open a migrated connection and seed an empty catalog first.
//! - Shaker state is process-wide; one shaker screen is active at a time.

use barmate_core::db::open_db;
use barmate_core::{
    core_version as core_version_inner, default_catalog, init_logging as init_logging_inner,
    ping as ping_inner, AppConfig, CatalogService, Drink, DrinkFilter, ShakeTimer,
    SqliteDrinkRepository, TimerEvent,
};
use log::warn;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static CATALOG_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SHAKER: Lazy<Mutex<ShakeTimer>> = Lazy::new(|| Mutex::new(ShakeTimer::default()));

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.trim()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Drink row as rendered by list and detail screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkItem {
    pub id: i64,
    pub name: String,
    /// Ingredient entries split for bullet display.
    pub ingredients: Vec<String>,
    pub description: String,
    pub image: String,
    pub shaking_time_secs: u32,
    pub is_favourite: bool,
}

/// List response envelope for the catalog screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogListResponse {
    pub ok: bool,
    pub items: Vec<DrinkItem>,
    pub message: String,
}

/// Single-drink response envelope for detail, favourite and share flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkActionResponse {
    pub ok: bool,
    pub drink: Option<DrinkItem>,
    pub message: String,
}

impl DrinkActionResponse {
    fn success(drink: &Drink, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            drink: Some(to_drink_item(drink)),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            drink: None,
            message: message.into(),
        }
    }
}

/// Shaker screen state after a control action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShakerState {
    pub remaining_secs: u32,
    /// `MM:SS` countdown text.
    pub display: String,
    /// Primary button label: `Start`, `Stop` or `Resume`.
    pub action_label: String,
    pub is_running: bool,
    /// True only on the call that completed the countdown.
    pub finished: bool,
}

/// Lists drinks whose name contains `query`, optionally favourites only.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_list(query: String, only_favourites: bool) -> CatalogListResponse {
    let filter = DrinkFilter::new(query, only_favourites);
    match with_catalog_service(|service| service.search(&filter)) {
        Ok(drinks) => {
            let message = if drinks.is_empty() {
                "No drinks.".to_string()
            } else {
                format!("Found {} drink(s).", drinks.len())
            };
            CatalogListResponse {
                ok: true,
                items: drinks.iter().map(to_drink_item).collect(),
                message,
            }
        }
        Err(err) => CatalogListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("catalog_list failed: {err}"),
        },
    }
}

/// Loads one drink by exact name.
#[flutter_rust_bridge::frb(sync)]
pub fn drink_detail(name: String) -> DrinkActionResponse {
    match with_catalog_service(|service| service.get_drink_by_name(name.trim())) {
        Ok(Some(drink)) => DrinkActionResponse::success(&drink, "Drink loaded."),
        Ok(None) => DrinkActionResponse::failure(format!("drink not found: {}", name.trim())),
        Err(err) => DrinkActionResponse::failure(format!("drink_detail failed: {err}")),
    }
}

/// Flips the favourite flag of the named drink.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_favourite(name: String) -> DrinkActionResponse {
    match with_catalog_service(|service| service.toggle_favourite_by_name(name.trim())) {
        Ok(Some(drink)) => DrinkActionResponse::success(&drink, "Favourite updated."),
        Ok(None) => DrinkActionResponse::failure(format!("drink not found: {}", name.trim())),
        Err(err) => DrinkActionResponse::failure(format!("toggle_favourite failed: {err}")),
    }
}

/// Returns the ingredient message body for the share sheet.
///
/// Empty string when the drink does not exist or storage fails.
#[flutter_rust_bridge::frb(sync)]
pub fn share_ingredients_message(name: String) -> String {
    match with_catalog_service(|service| service.get_drink_by_name(name.trim())) {
        Ok(Some(drink)) => drink.share_message(),
        Ok(None) => String::new(),
        Err(err) => {
            warn!("event=share_message module=ffi status=error error={err}");
            String::new()
        }
    }
}

/// Arms the shaker with a drink's duration and resets it.
#[flutter_rust_bridge::frb(sync)]
pub fn shaker_initialize(shaking_time_secs: u32) -> ShakerState {
    with_shaker(|timer| {
        timer.initialize(shaking_time_secs);
        None
    })
}

/// Start/stop button: starts, pauses or resumes.
#[flutter_rust_bridge::frb(sync)]
pub fn shaker_toggle() -> ShakerState {
    with_shaker(ShakeTimer::toggle)
}

#[flutter_rust_bridge::frb(sync)]
pub fn shaker_reset() -> ShakerState {
    with_shaker(|timer| {
        timer.reset();
        None
    })
}

/// Advances one second; the UI calls this from its one-second ticker.
#[flutter_rust_bridge::frb(sync)]
pub fn shaker_tick() -> ShakerState {
    with_shaker(ShakeTimer::tick)
}

fn with_shaker(f: impl FnOnce(&mut ShakeTimer) -> Option<TimerEvent>) -> ShakerState {
    // A panic while holding the lock must not brick the shaker screen.
    let mut timer = SHAKER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let event = f(&mut *timer);
    ShakerState {
        remaining_secs: timer.remaining_secs(),
        display: timer.display(),
        action_label: timer.action().label().to_string(),
        is_running: timer.is_running(),
        finished: event == Some(TimerEvent::Finished),
    }
}

fn resolve_catalog_db_path() -> PathBuf {
    CATALOG_DB_PATH
        .get_or_init(|| match AppConfig::from_env() {
            Ok(config) => config.db_path,
            Err(err) => {
                warn!("event=config_load module=ffi status=error error={err}");
                barmate_core::config::default_db_path()
            }
        })
        .clone()
}

fn with_catalog_service<T>(
    f: impl FnOnce(
        &CatalogService<SqliteDrinkRepository<'_>>,
    ) -> barmate_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_catalog_db_path();
    let mut conn = open_db(&db_path).map_err(|err| format!("catalog DB open failed: {err}"))?;
    let repo = SqliteDrinkRepository::try_new(&mut conn)
        .map_err(|err| format!("catalog repo init failed: {err}"))?;
    let mut service = CatalogService::new(repo);
    service
        .seed_if_empty(&default_catalog())
        .map_err(|err| format!("catalog seed failed: {err}"))?;
    f(&service).map_err(|err| err.to_string())
}

fn to_drink_item(drink: &Drink) -> DrinkItem {
    DrinkItem {
        id: drink.id.0,
        name: drink.name.clone(),
        ingredients: drink
            .ingredient_list()
            .into_iter()
            .map(str::to_string)
            .collect(),
        description: drink.description.clone(),
        image: drink.image.clone(),
        shaking_time_secs: drink.shaking_time_secs,
        is_favourite: drink.is_favourite,
    }
}
