//! # Nutrition Data Module
//!
//! Built-in nutrition values for common foods and the lookup used before falling back to
//! an AI estimate. Values are per the listed serving size.

use log::debug;
use serde::{Deserialize, Serialize};

/// A row of the built-in nutrition table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionRecord {
    pub name: &'static str,
    pub serving_size: &'static str,
    pub calories: f64,
    pub protein: f64,
    pub fiber: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Nutrition values for one serving of a food, from the table or from an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Food name
    #[serde(default)]
    pub name: String,
    /// Serving the values refer to (e.g., "1 cup cooked (158g)")
    #[serde(default)]
    pub serving_size: Option<String>,
    /// Energy in kcal
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Fiber in grams
    #[serde(default)]
    pub fiber: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fats in grams
    #[serde(default)]
    pub fats: f64,
}

impl NutritionRecord {
    const fn new(
        name: &'static str,
        serving_size: &'static str,
        calories: f64,
        protein: f64,
        fiber: f64,
        carbs: f64,
        fats: f64,
    ) -> Self {
        Self {
            name,
            serving_size,
            calories,
            protein,
            fiber,
            carbs,
            fats,
        }
    }
}

impl From<&NutritionRecord> for NutritionFacts {
    fn from(record: &NutritionRecord) -> Self {
        Self {
            name: record.name.to_string(),
            serving_size: Some(record.serving_size.to_string()),
            calories: record.calories,
            protein: record.protein,
            fiber: record.fiber,
            carbs: record.carbs,
            fats: record.fats,
        }
    }
}

impl NutritionFacts {
    /// Generic values used when a food can be neither looked up nor estimated
    pub fn default_estimate(food_name: &str) -> Self {
        Self {
            name: food_name.to_string(),
            serving_size: Some("100g".to_string()),
            calories: 100.0,
            protein: 2.0,
            fiber: 1.0,
            carbs: 20.0,
            fats: 2.0,
        }
    }
}

/// Built-in nutrition table, searched in this order
pub static NUTRITION_TABLE: [NutritionRecord; 25] = [
    NutritionRecord::new("apple", "1 medium (182g)", 95.0, 0.5, 4.5, 25.0, 0.3),
    NutritionRecord::new("banana", "1 medium (118g)", 105.0, 1.3, 3.1, 27.0, 0.4),
    NutritionRecord::new("orange", "1 medium (131g)", 62.0, 1.2, 3.1, 15.4, 0.2),
    NutritionRecord::new("broccoli", "1 cup (91g)", 25.0, 2.5, 2.4, 6.0, 0.3),
    NutritionRecord::new("chicken breast", "100g cooked", 165.0, 31.0, 0.0, 0.0, 3.6),
    NutritionRecord::new("salmon", "100g cooked", 206.0, 22.0, 0.0, 0.0, 13.0),
    NutritionRecord::new("rice", "1 cup cooked (158g)", 205.0, 4.3, 0.6, 45.0, 0.4),
    NutritionRecord::new("pasta", "1 cup cooked (158g)", 221.0, 8.1, 2.5, 43.0, 1.3),
    NutritionRecord::new("bread", "1 slice (28g)", 79.0, 2.7, 0.8, 14.0, 1.1),
    NutritionRecord::new("egg", "1 large (50g)", 70.0, 6.0, 0.0, 0.4, 5.0),
    NutritionRecord::new("milk", "1 cup (244g)", 146.0, 8.0, 0.0, 12.0, 8.0),
    NutritionRecord::new("yogurt", "1 cup (245g)", 149.0, 12.0, 0.0, 17.0, 8.0),
    NutritionRecord::new("cheese", "1 oz (28g)", 113.0, 7.0, 0.0, 1.0, 9.0),
    NutritionRecord::new("beef", "100g cooked", 250.0, 26.0, 0.0, 0.0, 15.0),
    NutritionRecord::new("potato", "1 medium (173g)", 163.0, 4.3, 3.8, 37.0, 0.2),
    NutritionRecord::new("sweet potato", "1 medium (130g)", 112.0, 2.0, 3.8, 26.0, 0.1),
    NutritionRecord::new("spinach", "1 cup raw (30g)", 7.0, 0.9, 0.7, 1.1, 0.1),
    NutritionRecord::new("carrot", "1 medium (61g)", 25.0, 0.6, 1.7, 6.0, 0.1),
    NutritionRecord::new("avocado", "1 medium (201g)", 234.0, 3.0, 10.0, 12.0, 21.0),
    NutritionRecord::new("almonds", "1 oz (28g)", 164.0, 6.0, 3.5, 6.0, 14.0),
    NutritionRecord::new("oats", "1 cup cooked (234g)", 147.0, 5.9, 4.0, 24.0, 2.6),
    NutritionRecord::new("quinoa", "1 cup cooked (185g)", 222.0, 8.1, 5.2, 39.0, 3.6),
    NutritionRecord::new("lentils", "1 cup cooked (198g)", 230.0, 18.0, 15.6, 40.0, 0.8),
    NutritionRecord::new("black beans", "1 cup cooked (172g)", 227.0, 15.0, 15.0, 41.0, 0.9),
    NutritionRecord::new("tofu", "100g", 76.0, 8.0, 0.6, 1.9, 4.8),
];

/// Find the first table entry matching a food name
///
/// Matching is case-insensitive containment in either direction: "chicken" finds
/// "chicken breast", and "grilled salmon" finds "salmon".
///
/// # Examples
///
/// ```rust
/// use mealmind::nutrition_data::find_nutrition;
///
/// assert_eq!(find_nutrition("Boiled Eggs").map(|r| r.name), Some("egg"));
/// assert_eq!(find_nutrition("roti").map(|r| r.name), None);
/// assert_eq!(find_nutrition("grilled salmon").map(|r| r.name), Some("salmon"));
/// ```
pub fn find_nutrition(food_name: &str) -> Option<&'static NutritionRecord> {
    let query = food_name.to_lowercase();
    let found = NUTRITION_TABLE.iter().find(|record| {
        let name = record.name.to_lowercase();
        name.contains(&query) || query.contains(&name)
    });
    debug!(
        "Nutrition lookup for '{}': {}",
        food_name,
        found.map(|r| r.name).unwrap_or("no match")
    );
    found
}
