//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide use-case entry points (seed, search, favourite toggle) for
//!   session and FFI callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Seeding never runs against a non-empty catalog.
//! - Service layer remains storage-agnostic.

use crate::model::drink::{Drink, NewDrink};
use crate::repo::drink_repo::{DrinkRepository, RepoResult};
use crate::search::filter::{search_drinks, DrinkFilter};
use log::{debug, info};

/// Use-case service wrapper over a drink repository.
pub struct CatalogService<R: DrinkRepository> {
    repo: R,
}

impl<R: DrinkRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts `drinks` when the catalog is empty.
    ///
    /// Returns how many rows were inserted (`0` when data already existed).
    pub fn seed_if_empty(&mut self, drinks: &[NewDrink]) -> RepoResult<usize> {
        match self.repo.insert_all_if_empty(drinks)? {
            Some(ids) => {
                info!(
                    "event=catalog_seed module=service status=ok inserted={}",
                    ids.len()
                );
                Ok(ids.len())
            }
            None => {
                debug!("event=catalog_seed module=service status=skipped");
                Ok(0)
            }
        }
    }

    /// Replaces the catalog with `drinks`, dropping favourites.
    ///
    /// All-or-nothing: an invalid batch leaves the current rows untouched.
    pub fn reset_catalog(&mut self, drinks: &[NewDrink]) -> RepoResult<usize> {
        let (removed, ids) = self.repo.replace_all(drinks)?;
        info!(
            "event=catalog_reset module=service status=ok removed={} inserted={}",
            removed,
            ids.len()
        );
        Ok(ids.len())
    }

    pub fn search(&self, filter: &DrinkFilter) -> RepoResult<Vec<Drink>> {
        search_drinks(&self.repo, filter)
    }

    pub fn list_drinks(&self) -> RepoResult<Vec<Drink>> {
        self.repo.list_drinks()
    }

    pub fn list_favourites(&self) -> RepoResult<Vec<Drink>> {
        self.repo.list_favourites()
    }

    pub fn get_drink_by_name(&self, name: &str) -> RepoResult<Option<Drink>> {
        self.repo.get_drink_by_name(name)
    }

    /// Persists the flipped favourite flag and returns the stored record.
    ///
    /// Returns `NotFound` when the drink was deleted meanwhile.
    pub fn toggle_favourite(&self, drink: &Drink) -> RepoResult<Drink> {
        let updated = drink.with_favourite_toggled();
        self.repo.update_drink(&updated)?;
        info!(
            "event=favourite_toggle module=service status=ok drink_id={} is_favourite={}",
            updated.id, updated.is_favourite
        );
        Ok(updated)
    }

    /// Name-based variant of [`Self::toggle_favourite`]; `None` for unknown names.
    pub fn toggle_favourite_by_name(&self, name: &str) -> RepoResult<Option<Drink>> {
        match self.repo.get_drink_by_name(name)? {
            Some(drink) => self.toggle_favourite(&drink).map(Some),
            None => Ok(None),
        }
    }

    /// Borrows the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }
}
