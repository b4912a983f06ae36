//! # Dish Parser
//!
//! This module turns a free-form dish description ("2 boiled eggs and 1 roti") into
//! structured food items with a quantity and a unit.
//!
//! ## Features
//!
//! - Split descriptions on commas, `+`, `and`, `with`, `plus` and before each new number
//! - Numeric quantities with an optional unit token ("3 cups", "500 grams", "1kg")
//! - Spelled-out quantities ("half", "two") when no digits are present
//! - Never fails: a description with nothing extractable becomes one whole portion
//!
//! The rules are heuristic on purpose. Separators are matched as plain letter sequences,
//! so "sandwich" splits around its "and", and spelled-out quantities are found by
//! substring, so "tentacle" reads as ten.
//!
//! ## Usage
//!
//! ```rust
//! use mealmind::dish_parser::parse_dish_input;
//! use mealmind::dish_model::ServingUnit;
//!
//! let items = parse_dish_input("2 boiled eggs and 1 roti");
//!
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].name, "boiled eggs");
//! assert_eq!(items[0].quantity, 2.0);
//! assert_eq!(items[1].name, "roti");
//! assert_eq!(items[1].unit, ServingUnit::Piece);
//! ```

use crate::dish_model::{ParsedFoodItem, ServingUnit};
use crate::dish_patterns::{
    NUMBER_REGEX, PUNCTUATION_REGEX, QUANTITY_REGEX, QUANTITY_WORD_REGEX, SEPARATOR_REGEX,
    UNIT_WORD_REGEX, WORD_NUMBERS,
};
use log::{debug, trace};

/// Parse a dish description into food items
///
/// Always returns at least one item. When no segment yields a food name, the result is a
/// single item named after the untouched input with quantity 1 and unit `portion`.
///
/// # Examples
///
/// ```rust
/// use mealmind::dish_parser::parse_dish_input;
/// use mealmind::dish_model::ServingUnit;
///
/// let items = parse_dish_input("3 cups rice");
/// assert_eq!(items[0].name, "rice");
/// assert_eq!(items[0].quantity, 3.0);
/// assert_eq!(items[0].unit, ServingUnit::Cup);
///
/// let items = parse_dish_input("!!!");
/// assert_eq!(items[0].name, "!!!");
/// assert_eq!(items[0].unit, ServingUnit::Portion);
/// ```
pub fn parse_dish_input(input: &str) -> Vec<ParsedFoodItem> {
    let segments = segment_dish_input(input);
    debug!(
        "Split dish description into {} segments: {:?}",
        segments.len(),
        segments
    );

    let mut items: Vec<ParsedFoodItem> = segments
        .into_iter()
        .filter_map(extract_food_item)
        .collect();

    if items.is_empty() {
        debug!("No food items extracted, using whole description as one portion");
        items.push(ParsedFoodItem::whole_portion(input));
    }

    items
}

/// Split a dish description into trimmed, non-empty segments
///
/// Separators are `,`, `+`, the letter sequences `and`, `with` and `plus` (ASCII, any
/// case), and a single whitespace character directly followed by a digit.
pub fn segment_dish_input(input: &str) -> Vec<&str> {
    SEPARATOR_REGEX
        .split(input)
        .flat_map(split_before_quantities)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Extract a food item from one segment
///
/// Returns `None` when nothing is left of the segment once quantities, units, quantity words
/// and punctuation are removed.
pub fn extract_food_item(segment: &str) -> Option<ParsedFoodItem> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    let (quantity, unit) = detect_quantity(segment);
    let name = strip_food_name(segment);

    if name.is_empty() {
        trace!("Segment '{}' has no food name left, skipping", segment);
        return None;
    }

    trace!(
        "Segment '{}' -> name='{}', quantity={}, unit={}",
        segment,
        name,
        quantity,
        unit
    );

    Some(ParsedFoodItem {
        name,
        quantity,
        unit,
    })
}

/// Split before every whitespace character that precedes a digit, dropping that character
fn split_before_quantities(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !ch.is_whitespace() {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_ascii_digit() {
                pieces.push(&text[start..idx]);
                start = next_idx;
            }
        }
    }

    pieces.push(&text[start..]);
    pieces
}

/// Quantity and unit of a segment; digits win over spelled-out numbers
fn detect_quantity(segment: &str) -> (f64, ServingUnit) {
    if let Some(captures) = QUANTITY_REGEX.captures(segment) {
        let quantity = captures[1].parse::<f64>().unwrap_or(1.0);
        let unit = captures
            .get(2)
            .and_then(|m| ServingUnit::from_token(m.as_str()))
            .unwrap_or_default();
        return (quantity, unit);
    }

    let quantity = word_number_quantity(segment).unwrap_or(1.0);
    (quantity, ServingUnit::Piece)
}

/// Value of the first spelled-out number (in vocabulary order) contained in the segment
fn word_number_quantity(segment: &str) -> Option<f64> {
    let lower = segment.to_lowercase();
    WORD_NUMBERS
        .iter()
        .find(|(word, _)| lower.contains(word))
        .map(|(_, value)| *value)
}

/// Remove numbers, unit words, quantity words and punctuation, in that order
fn strip_food_name(segment: &str) -> String {
    let without_numbers = NUMBER_REGEX.replace_all(segment, "");
    let without_units = UNIT_WORD_REGEX.replace_all(&without_numbers, "");
    let without_words = QUANTITY_WORD_REGEX.replace_all(&without_units, "");
    let cleaned = PUNCTUATION_REGEX.replace_all(&without_words, "");
    cleaned.trim().to_string()
}
