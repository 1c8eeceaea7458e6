//! Catalog screen state holder (view-model).
//!
//! # Responsibility
//! - Own all UI-facing state: active screen, filter, selection, sheet and
//!   ready-dialog flags, and the shaking timer.
//! - Route user intents to the catalog service and refresh derived state.
//!
//! # Invariants
//! - `filtered_drinks` always reflects the current filter after any intent
//!   that can change it (filter edits, favourite toggles, seeding).
//! - Selecting a drink initializes the timer with its shaking time.
//! - Leaving the shaker screen resets the timer.
//! - The ready dialog opens once per finished countdown.

use crate::model::drink::Drink;
use crate::repo::drink_repo::{DrinkRepository, RepoResult};
use crate::search::filter::DrinkFilter;
use crate::seed::default_catalog;
use crate::service::catalog_service::CatalogService;
use crate::timer::shake_timer::{ShakeTimer, TimerEvent};
use log::debug;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Screens of the catalog flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    DrinkList,
    DrinkDetail,
    Shaker,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DrinkList => "drink_list",
            Self::DrinkDetail => "drink_detail",
            Self::Shaker => "shaker",
        }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct CatalogSession<R: DrinkRepository> {
    service: CatalogService<R>,
    filter: DrinkFilter,
    filtered: Vec<Drink>,
    screen: Screen,
    selected: Option<Drink>,
    sheet_open: bool,
    ready_dialog: bool,
    timer: ShakeTimer,
}

impl<R: DrinkRepository> CatalogSession<R> {
    /// Opens a session, seeding the built-in catalog into an empty store.
    pub fn open(repo: R) -> RepoResult<Self> {
        let mut service = CatalogService::new(repo);
        service.seed_if_empty(&default_catalog())?;

        let mut session = Self {
            service,
            filter: DrinkFilter::default(),
            filtered: Vec::new(),
            screen: Screen::DrinkList,
            selected: None,
            sheet_open: false,
            ready_dialog: false,
            timer: ShakeTimer::default(),
        };
        session.reload()?;
        Ok(session)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> RepoResult<()> {
        self.filter.query = query.into();
        self.reload()
    }

    pub fn set_only_favourites(&mut self, only_favourites: bool) -> RepoResult<()> {
        self.filter.only_favourites = only_favourites;
        self.reload()
    }

    /// Re-runs the current filter against storage.
    pub fn reload(&mut self) -> RepoResult<()> {
        self.filtered = self.service.search(&self.filter)?;
        Ok(())
    }

    pub fn filter(&self) -> &DrinkFilter {
        &self.filter
    }

    pub fn filtered_drinks(&self) -> &[Drink] {
        &self.filtered
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_drink(&self) -> Option<&Drink> {
        self.selected.as_ref()
    }

    /// Selects a drink for detail view; `None` clears the selection only.
    pub fn select_drink(&mut self, drink: Option<Drink>) {
        if let Some(drink) = &drink {
            self.screen = Screen::DrinkDetail;
            self.timer.initialize(drink.shaking_time_secs);
            debug!(
                "event=navigate module=session status=ok screen={} drink_id={}",
                self.screen, drink.id
            );
        }
        self.selected = drink;
    }

    pub fn navigate_back_to_list(&mut self) {
        self.screen = Screen::DrinkList;
    }

    pub fn navigate_to_shaker(&mut self) {
        self.screen = Screen::Shaker;
    }

    pub fn navigate_back_to_detail(&mut self) {
        self.screen = Screen::DrinkDetail;
        self.timer.reset();
    }

    pub fn is_sheet_open(&self) -> bool {
        self.sheet_open
    }

    pub fn toggle_sheet(&mut self) {
        self.sheet_open = !self.sheet_open;
    }

    pub fn is_ready_dialog_shown(&self) -> bool {
        self.ready_dialog
    }

    pub fn toggle_ready_dialog(&mut self) {
        self.ready_dialog = !self.ready_dialog;
    }

    /// Persists the flipped favourite flag and refreshes list and selection.
    pub fn toggle_favourite(&mut self, drink: &Drink) -> RepoResult<Drink> {
        let updated = self.service.toggle_favourite(drink)?;
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.id == updated.id)
        {
            self.selected = Some(updated.clone());
        }
        self.reload()?;
        Ok(updated)
    }

    pub fn get_drink_by_name(&self, name: &str) -> RepoResult<Option<Drink>> {
        self.service.get_drink_by_name(name)
    }

    pub fn timer(&self) -> &ShakeTimer {
        &self.timer
    }

    pub fn start_timer(&mut self) {
        let event = self.timer.start();
        self.handle_timer_event(event);
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    /// Advances the timer one second; returns the finish event when it fires.
    pub fn tick_timer(&mut self) -> Option<TimerEvent> {
        let event = self.timer.tick();
        self.handle_timer_event(event);
        event
    }

    pub fn service(&self) -> &CatalogService<R> {
        &self.service
    }

    fn handle_timer_event(&mut self, event: Option<TimerEvent>) {
        if let Some(TimerEvent::Finished) = event {
            self.ready_dialog = true;
        }
    }
}
