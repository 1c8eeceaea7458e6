//! Drink domain model.
//!
//! # Responsibility
//! - Define the canonical recipe record persisted in the `drinks` table.
//! - Provide display helpers derived from free-text fields.
//!
//! # Invariants
//! - `name` is never blank; it is the natural key for by-name lookups.
//! - `shaking_time_secs` stays within `1..=MAX_SHAKING_TIME_SECS`.
//! - `id` is assigned by storage; `NewDrink` carries no id.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for a recipe shaking duration (one hour).
pub const MAX_SHAKING_TIME_SECS: u32 = 3600;
/// Upper bound for an image reference in bytes.
pub const MAX_IMAGE_REF_BYTES: usize = 256;
/// Header line of the shareable ingredients message.
pub const SHARE_MESSAGE_HEADER: &str = "Drink ingredients:";

const INGREDIENT_DELIMITER: char = ',';

// Leading quantity such as `50ml`, `2 Dashes`, `1`, `6 leaves`.
static INGREDIENT_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:[.,]\d+)?\s*(?:ml|cl|oz|g|dashes|dash|leaves|slices|slice|cubes|cube)?)\s+(.+)$")
        .expect("valid ingredient amount regex")
});

/// Storage-assigned identifier of a drink row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrinkId(pub i64);

impl Display for DrinkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for drink records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrinkValidationError {
    BlankName,
    ShakingTimeOutOfRange(u32),
    ImageRefTooLong(usize),
}

impl Display for DrinkValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "drink name cannot be blank"),
            Self::ShakingTimeOutOfRange(value) => write!(
                f,
                "shaking_time_secs must be within 1..={MAX_SHAKING_TIME_SECS}, got {value}"
            ),
            Self::ImageRefTooLong(len) => write!(
                f,
                "image reference is {len} bytes, limit is {MAX_IMAGE_REF_BYTES}"
            ),
        }
    }
}

impl Error for DrinkValidationError {}

/// A recipe that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDrink {
    pub name: String,
    /// Comma-delimited ingredient list.
    pub ingredients: String,
    pub description: String,
    /// Asset key of the drink picture, empty when none.
    pub image: String,
    pub shaking_time_secs: u32,
    pub is_favourite: bool,
}

impl NewDrink {
    /// Creates a non-favourite recipe.
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        shaking_time_secs: u32,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            description: description.into(),
            image: image.into(),
            shaking_time_secs,
            is_favourite: false,
        }
    }

    pub fn validate(&self) -> Result<(), DrinkValidationError> {
        validate_fields(&self.name, &self.image, self.shaking_time_secs)
    }

    /// Attaches a storage id, producing the persisted shape.
    pub fn into_drink(self, id: DrinkId) -> Drink {
        Drink {
            id,
            name: self.name,
            ingredients: self.ingredients,
            description: self.description,
            image: self.image,
            shaking_time_secs: self.shaking_time_secs,
            is_favourite: self.is_favourite,
        }
    }
}

/// Canonical persisted recipe record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: DrinkId,
    pub name: String,
    pub ingredients: String,
    pub description: String,
    pub image: String,
    pub shaking_time_secs: u32,
    pub is_favourite: bool,
}

/// One parsed entry of a drink's ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    /// Leading quantity (`50ml`, `2 Dashes`), when present.
    pub amount: Option<String>,
    pub name: String,
}

impl Drink {
    pub fn validate(&self) -> Result<(), DrinkValidationError> {
        validate_fields(&self.name, &self.image, self.shaking_time_secs)
    }

    /// Splits the free-text ingredients into display entries.
    ///
    /// Entries are trimmed, empty entries are dropped, order is preserved.
    pub fn ingredient_list(&self) -> Vec<&str> {
        self.ingredients
            .split(INGREDIENT_DELIMITER)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }

    /// Parses every listed ingredient into amount and name.
    pub fn parsed_ingredients(&self) -> Vec<Ingredient> {
        self.ingredient_list()
            .into_iter()
            .map(parse_ingredient)
            .collect()
    }

    /// Text body used when sharing the ingredient list with someone else.
    pub fn share_message(&self) -> String {
        format!("{SHARE_MESSAGE_HEADER}\n{}", self.ingredients)
    }

    /// Returns a copy with the favourite flag flipped.
    pub fn with_favourite_toggled(&self) -> Self {
        Self {
            is_favourite: !self.is_favourite,
            ..self.clone()
        }
    }
}

/// Parses a single ingredient entry such as `50ml Tequila`.
pub fn parse_ingredient(entry: &str) -> Ingredient {
    let entry = entry.trim();
    match INGREDIENT_AMOUNT_RE.captures(entry) {
        Some(caps) => Ingredient {
            amount: Some(caps[1].trim().to_string()),
            name: caps[2].trim().to_string(),
        },
        None => Ingredient {
            amount: None,
            name: entry.to_string(),
        },
    }
}

fn validate_fields(
    name: &str,
    image: &str,
    shaking_time_secs: u32,
) -> Result<(), DrinkValidationError> {
    if name.trim().is_empty() {
        return Err(DrinkValidationError::BlankName);
    }
    if !(1..=MAX_SHAKING_TIME_SECS).contains(&shaking_time_secs) {
        return Err(DrinkValidationError::ShakingTimeOutOfRange(
            shaking_time_secs,
        ));
    }
    if image.len() > MAX_IMAGE_REF_BYTES {
        return Err(DrinkValidationError::ImageRefTooLong(image.len()));
    }
    Ok(())
}
