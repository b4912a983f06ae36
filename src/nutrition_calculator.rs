//! # Nutrition Calculator Module
//!
//! Energy requirement formulas and the arithmetic used to scale nutrition values.
//!
//! - BMR uses the Mifflin-St Jeor equation
//! - TDEE multiplies BMR by an activity factor
//! - Goal targets shift TDEE by a fixed calorie offset
//!
//! Rounding is half-up (towards positive infinity on ties), so 2.5 becomes 3 and -2.5
//! becomes -2.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref FIRST_INTEGER_REGEX: Regex =
        Regex::new(r"[0-9]+").expect("Integer pattern should be valid");
}

/// Biological sex used by the BMR equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Physical activity level and its TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

/// What the user wants their intake to achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    #[default]
    Maintenance,
}

impl From<&str> for Gender {
    /// Anything other than "female" (any case) counts as male
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("female") {
            Gender::Female
        } else {
            Gender::Male
        }
    }
}

impl From<&str> for ActivityLevel {
    /// Unknown levels count as sedentary
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Sedentary,
        }
    }
}

impl From<&str> for Goal {
    /// Unknown goals count as maintenance
    fn from(value: &str) -> Self {
        match value.trim() {
            "weight_loss" => Goal::WeightLoss,
            "muscle_gain" => Goal::MuscleGain,
            _ => Goal::Maintenance,
        }
    }
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl Goal {
    /// Daily calorie adjustment applied on top of TDEE
    pub fn calorie_offset(&self) -> i64 {
        match self {
            Goal::WeightLoss => -500,
            Goal::MuscleGain => 300,
            Goal::Maintenance => 0,
        }
    }
}

/// Round to the nearest integer, ties towards positive infinity
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to two decimal places, ties towards positive infinity
pub fn round_to_hundredths(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor), rounded
///
/// # Examples
///
/// ```rust
/// use mealmind::nutrition_calculator::{calculate_bmr, Gender};
///
/// assert_eq!(calculate_bmr(70.0, 175.0, 30, Gender::Male), 1649);
/// assert_eq!(calculate_bmr(70.0, 175.0, 30, Gender::Female), 1483);
/// ```
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> i64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    let bmr = match gender {
        Gender::Female => base - 161.0,
        Gender::Male => base + 5.0,
    };
    round_half_up(bmr) as i64
}

/// Total daily energy expenditure in kcal/day, rounded
pub fn calculate_tdee(bmr: i64, activity_level: ActivityLevel) -> i64 {
    round_half_up(bmr as f64 * activity_level.multiplier()) as i64
}

/// Daily calorie target for a goal
pub fn target_calories(tdee: i64, goal: Goal) -> i64 {
    tdee + goal.calorie_offset()
}

/// Factor to scale one serving's nutrition values to the eaten quantity
///
/// The serving's first integer is taken as its base amount ("100g cooked" → 100,
/// "1 cup (91g)" → 1); a missing or zero base counts as 1. The quantity's unit is not
/// converted.
pub fn serving_multiplier(quantity: f64, serving_size: Option<&str>) -> f64 {
    let Some(serving_size) = serving_size.filter(|s| !s.is_empty()) else {
        return quantity;
    };

    let base = FIRST_INTEGER_REGEX
        .find(serving_size)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|base| *base != 0.0)
        .unwrap_or(1.0);

    quantity / base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(1649.4), 1649.0);
        assert_eq!(round_to_hundredths(1.234), 1.23);
        assert_eq!(round_to_hundredths(0.125), 0.13);
    }

    #[test]
    fn test_bmr() {
        assert_eq!(calculate_bmr(70.0, 175.0, 30, Gender::Male), 1649);
        assert_eq!(calculate_bmr(60.0, 165.0, 25, Gender::Female), 1345);
    }

    #[test]
    fn test_tdee() {
        assert_eq!(calculate_tdee(1649, ActivityLevel::Sedentary), 1979);
        assert_eq!(calculate_tdee(1649, ActivityLevel::Moderate), 2556);
        assert_eq!(calculate_tdee(1649, ActivityLevel::VeryActive), 3133);
    }

    #[test]
    fn test_lenient_conversions() {
        assert_eq!(Gender::from("FEMALE"), Gender::Female);
        assert_eq!(Gender::from("other"), Gender::Male);
        assert_eq!(ActivityLevel::from("Very_Active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::from("couch"), ActivityLevel::Sedentary);
        assert_eq!(Goal::from("muscle_gain"), Goal::MuscleGain);
        assert_eq!(Goal::from("bulk"), Goal::Maintenance);
    }

    #[test]
    fn test_target_calories() {
        assert_eq!(target_calories(2556, Goal::WeightLoss), 2056);
        assert_eq!(target_calories(2556, Goal::MuscleGain), 2856);
        assert_eq!(target_calories(2556, Goal::Maintenance), 2556);
    }

    #[test]
    fn test_serving_multiplier() {
        assert_eq!(serving_multiplier(500.0, Some("100g cooked")), 5.0);
        assert_eq!(serving_multiplier(3.0, Some("1 cup cooked (158g)")), 3.0);
        assert_eq!(serving_multiplier(2.0, Some("per bowl")), 2.0);
        assert_eq!(serving_multiplier(2.0, Some("0 g")), 2.0);
        assert_eq!(serving_multiplier(4.0, None), 4.0);
    }
}
