//! # Dish Data Model
//!
//! This module defines the records produced by the dish parser.
//!
//! ## Core Concepts
//!
//! - **ParsedFoodItem**: one food mentioned in a dish description, with its quantity and unit
//! - **ServingUnit**: the unit token the quantity was written in
//!
//! ## Usage
//!
//! ```rust
//! use mealmind::dish_model::{ParsedFoodItem, ServingUnit};
//!
//! let rice = ParsedFoodItem::new("rice", 3.0, ServingUnit::Cup);
//! assert_eq!(rice.to_string(), "3 cup rice");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A food item extracted from a dish description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFoodItem {
    /// The food name as written, minus quantities, units and punctuation (e.g., "boiled eggs")
    pub name: String,

    /// Amount of the unit (defaults to 1)
    pub quantity: f64,

    /// Unit the amount is expressed in (defaults to `piece`)
    pub unit: ServingUnit,
}

/// Unit tokens recognized in dish descriptions
///
/// Spelling variants are kept apart (`Tbsp` vs `Tablespoon`) because the token the user typed
/// is what gets reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServingUnit {
    // Volume units
    /// Cups
    Cup,
    /// Tablespoons, long form
    Tablespoon,
    /// Tablespoons, abbreviated
    Tbsp,
    /// Teaspoons, long form
    Teaspoon,
    /// Teaspoons, abbreviated
    Tsp,

    // Weight units
    /// Ounces, abbreviated
    Oz,
    /// Ounces, long form
    Ounce,
    /// Pounds, abbreviated
    Lb,
    /// Pounds, long form
    Pound,
    /// Grams, long form
    Gram,
    /// Grams, abbreviated
    G,
    /// Kilograms, long form
    Kilogram,
    /// Kilograms, abbreviated
    Kg,

    // Count units
    /// Individual pieces (the default)
    Piece,
    /// Slices
    Slice,
    /// Items
    Item,

    // Small amounts
    /// Pinch
    Pinch,
    /// Dash
    Dash,
    /// Handful
    Handful,

    // Sizes
    /// Small
    Small,
    /// Medium
    Medium,
    /// Large
    Large,

    /// The whole description taken as one serving
    Portion,
}

impl ServingUnit {
    /// Map a matched unit token (any case, plural or singular) to its unit
    ///
    /// Plurals collapse onto the singular variant. Unknown tokens return `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let unit = match token.to_lowercase().as_str() {
            "cup" | "cups" => ServingUnit::Cup,
            "tablespoon" => ServingUnit::Tablespoon,
            "tbsp" => ServingUnit::Tbsp,
            "teaspoon" => ServingUnit::Teaspoon,
            "tsp" => ServingUnit::Tsp,
            "oz" => ServingUnit::Oz,
            "ounce" | "ounces" => ServingUnit::Ounce,
            "lb" => ServingUnit::Lb,
            "pound" | "pounds" => ServingUnit::Pound,
            "gram" | "grams" => ServingUnit::Gram,
            "g" => ServingUnit::G,
            "kilogram" | "kilograms" => ServingUnit::Kilogram,
            "kg" => ServingUnit::Kg,
            "piece" | "pieces" => ServingUnit::Piece,
            "slice" | "slices" => ServingUnit::Slice,
            "item" | "items" => ServingUnit::Item,
            "pinch" => ServingUnit::Pinch,
            "dash" => ServingUnit::Dash,
            "handful" => ServingUnit::Handful,
            "small" => ServingUnit::Small,
            "medium" => ServingUnit::Medium,
            "large" => ServingUnit::Large,
            "portion" => ServingUnit::Portion,
            _ => return None,
        };
        Some(unit)
    }

    /// The lower-case token for this unit
    pub fn as_str(&self) -> &'static str {
        match self {
            ServingUnit::Cup => "cup",
            ServingUnit::Tablespoon => "tablespoon",
            ServingUnit::Tbsp => "tbsp",
            ServingUnit::Teaspoon => "teaspoon",
            ServingUnit::Tsp => "tsp",
            ServingUnit::Oz => "oz",
            ServingUnit::Ounce => "ounce",
            ServingUnit::Lb => "lb",
            ServingUnit::Pound => "pound",
            ServingUnit::Gram => "gram",
            ServingUnit::G => "g",
            ServingUnit::Kilogram => "kilogram",
            ServingUnit::Kg => "kg",
            ServingUnit::Piece => "piece",
            ServingUnit::Slice => "slice",
            ServingUnit::Item => "item",
            ServingUnit::Pinch => "pinch",
            ServingUnit::Dash => "dash",
            ServingUnit::Handful => "handful",
            ServingUnit::Small => "small",
            ServingUnit::Medium => "medium",
            ServingUnit::Large => "large",
            ServingUnit::Portion => "portion",
        }
    }
}

impl Default for ServingUnit {
    fn default() -> Self {
        ServingUnit::Piece
    }
}

impl fmt::Display for ServingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParsedFoodItem {
    /// Create a new parsed item
    pub fn new(name: &str, quantity: f64, unit: ServingUnit) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit,
        }
    }

    /// The single item standing in for a description nothing could be extracted from
    pub fn whole_portion(input: &str) -> Self {
        Self::new(input, 1.0, ServingUnit::Portion)
    }

    /// Check if this item is the whole-description fallback
    pub fn is_whole_portion(&self) -> bool {
        self.unit == ServingUnit::Portion
    }

    /// Quantity and unit as shown to users, e.g. "1.5 cup"
    pub fn quantity_label(&self) -> String {
        format!("{} {}", self.quantity, self.unit)
    }
}

impl fmt::Display for ParsedFoodItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity_label(), self.name)
    }
}
