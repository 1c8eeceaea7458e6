//! Name search and favourite filter for the drink list.
//!
//! # Responsibility
//! - Translate free user text into a safe SQL `LIKE` pattern.
//! - Apply the favourite-only toggle on top of name matches.
//!
//! # Invariants
//! - User text is matched literally: `%`, `_` and `\` never act as wildcards.
//! - Blank query matches every drink.
//! - Result order follows repository order (`id ASC`).

use crate::model::drink::Drink;
use crate::repo::drink_repo::{DrinkRepository, RepoResult};
use log::debug;

const LIKE_ESCAPE: char = '\\';

/// Current list filter as edited by the search bar and favourites toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkFilter {
    /// Substring searched in drink names.
    pub query: String,
    /// When set, only favourites are returned.
    pub only_favourites: bool,
}

impl DrinkFilter {
    pub fn new(query: impl Into<String>, only_favourites: bool) -> Self {
        Self {
            query: query.into(),
            only_favourites,
        }
    }

    /// In-memory equivalent of the SQL predicate used by [`search_drinks`].
    ///
    /// Case folding is ASCII-only, mirroring SQLite's default `LIKE`.
    pub fn matches(&self, drink: &Drink) -> bool {
        if self.only_favourites && !drink.is_favourite {
            return false;
        }
        let needle = self.query.trim();
        if needle.is_empty() {
            return true;
        }
        drink
            .name
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase())
    }
}

/// Builds a `%text%` pattern with LIKE metacharacters escaped by `\`.
pub fn like_pattern(query: &str) -> String {
    let trimmed = query.trim();
    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for ch in trimmed.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Runs the name search in storage and applies the favourite filter.
pub fn search_drinks<R: DrinkRepository + ?Sized>(
    repo: &R,
    filter: &DrinkFilter,
) -> RepoResult<Vec<Drink>> {
    let pattern = like_pattern(&filter.query);
    let mut drinks = repo.find_drinks_by_pattern(&pattern)?;
    if filter.only_favourites {
        drinks.retain(|drink| drink.is_favourite);
    }
    debug!(
        "event=drink_search module=search status=ok only_favourites={} hits={}",
        filter.only_favourites,
        drinks.len()
    );
    Ok(drinks)
}
