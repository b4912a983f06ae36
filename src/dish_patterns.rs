//! # Dish Patterns Module
//!
//! This module contains the fixed vocabularies and regex patterns used by the dish parser.
//!
//! The unit list feeds both quantity detection and name stripping, so both patterns are
//! built from the same array. Order is significant: alternations are tried left to right.
//!
//! Word matching is ASCII-only: letters fold case only within A-Z, and word boundaries
//! treat every non-ASCII character as a non-word character.

use lazy_static::lazy_static;
use regex::Regex;

/// Recognized unit tokens, in alternation order
pub const UNIT_TOKENS: [&str; 30] = [
    "cup", "cups", "tablespoon", "tbsp", "teaspoon", "tsp", "oz", "ounce", "ounces", "lb",
    "pound", "pounds", "gram", "grams", "g", "kg", "kilogram", "kilograms", "piece", "pieces",
    "slice", "slices", "item", "items", "pinch", "dash", "handful", "small", "medium", "large",
];

/// Spelled-out quantities and their values, scanned in this order
pub const WORD_NUMBERS: [(&str, f64); 12] = [
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("half", 0.5),
    ("quarter", 0.25),
];

/// Top-level separators between food items (whitespace-before-digit is handled separately)
///
/// Case folding is ASCII-only, as in every word pattern here.
pub const SEPARATOR_PATTERN: &str = r"(?i-u:[,+]|and|with|plus)";

/// A number together with any whitespace after it
pub const NUMBER_PATTERN: &str = r"[0-9]+(?:\.[0-9]+)?\s*";

/// Anything that is neither an ASCII word character nor whitespace
pub const PUNCTUATION_PATTERN: &str = r"[^A-Za-z0-9_\s]";

/// Pipe-joined unit alternation shared by detection and stripping
pub fn unit_alternation() -> String {
    UNIT_TOKENS.join("|")
}

/// Pipe-joined quantity-word alternation
pub fn word_number_alternation() -> String {
    WORD_NUMBERS
        .iter()
        .map(|(word, _)| *word)
        .collect::<Vec<_>>()
        .join("|")
}

// Compiled once on first use
lazy_static! {
    pub static ref SEPARATOR_REGEX: Regex =
        Regex::new(SEPARATOR_PATTERN).expect("Separator pattern should be valid");
    pub static ref QUANTITY_REGEX: Regex = Regex::new(&format!(
        r"([0-9]+(?:\.[0-9]+)?)\s*((?i-u:{}))?",
        unit_alternation()
    ))
    .expect("Quantity pattern should be valid");
    pub static ref NUMBER_REGEX: Regex =
        Regex::new(NUMBER_PATTERN).expect("Number pattern should be valid");
    pub static ref UNIT_WORD_REGEX: Regex =
        Regex::new(&format!(r"(?-u:\b)(?i-u:{})(?-u:\b)", unit_alternation()))
            .expect("Unit word pattern should be valid");
    pub static ref QUANTITY_WORD_REGEX: Regex =
        Regex::new(&format!(r"(?-u:\b)(?i-u:{})(?-u:\b)", word_number_alternation()))
            .expect("Quantity word pattern should be valid");
    pub static ref PUNCTUATION_REGEX: Regex =
        Regex::new(PUNCTUATION_PATTERN).expect("Punctuation pattern should be valid");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_alternation_keeps_order() {
        let alternation = unit_alternation();
        assert!(alternation.starts_with("cup|cups|tablespoon"));
        assert!(alternation.ends_with("small|medium|large"));
        assert_eq!(alternation.split('|').count(), 30);
    }

    #[test]
    fn test_word_numbers_order() {
        let words: Vec<&str> = WORD_NUMBERS.iter().map(|(w, _)| *w).collect();
        assert_eq!(words.first(), Some(&"one"));
        assert_eq!(words[9], "ten");
        assert_eq!(words.last(), Some(&"quarter"));
    }

    #[test]
    fn test_quantity_regex_prefers_first_alternative() {
        let caps = QUANTITY_REGEX.captures("3 cups rice").unwrap();
        assert_eq!(&caps[1], "3");
        assert_eq!(&caps[2], "cup");

        let caps = QUANTITY_REGEX.captures("500 grams chicken").unwrap();
        assert_eq!(&caps[2], "gram");
    }

    #[test]
    fn test_unit_word_regex_requires_whole_words() {
        assert!(UNIT_WORD_REGEX.is_match("two Slices of bread"));
        assert!(!UNIT_WORD_REGEX.is_match("cupboard"));
    }

    #[test]
    fn test_word_boundaries_are_ascii() {
        // Non-ASCII letters do not extend a word
        assert!(UNIT_WORD_REGEX.is_match("écup"));
        assert!(UNIT_WORD_REGEX.is_match("kgचावल"));
        assert!(QUANTITY_WORD_REGEX.is_match("ñone"));
    }

    #[test]
    fn test_case_folding_is_ascii() {
        // Long s and the Kelvin sign only fold to s and k under Unicode rules
        assert!(!UNIT_WORD_REGEX.is_match("tſp"));
        assert!(QUANTITY_REGEX.captures("2 \u{212A}g").unwrap().get(2).is_none());
        assert!(!SEPARATOR_REGEX.is_match("plu\u{17F}"));
        assert_eq!(&QUANTITY_REGEX.captures("2 TBSP").unwrap()[2], "TBSP");
    }
}
