//! # Dish Analysis Module
//!
//! Runs a dish description through the full pipeline: parse it into food items, look each
//! item up in the nutrition table (falling back to an estimator), scale the values to the
//! eaten quantity, and add everything up.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::dish_model::ParsedFoodItem;
use crate::dish_parser::parse_dish_input;
use crate::nutrition_calculator::{round_half_up, round_to_hundredths, serving_multiplier};
use crate::nutrition_data::{find_nutrition, NutritionFacts};
use crate::nutrition_estimator::NutritionEstimator;

/// Nutrition totals for a whole dish
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub fiber: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Nutrition of one food item at the eaten quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionBreakdown {
    /// Lower-cased food name
    pub name: String,
    /// Quantity and unit, e.g. "2 piece"
    pub quantity: String,
    pub calories: f64,
    pub protein: f64,
    pub fiber: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Result of analyzing a dish description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishAnalysis {
    pub success: bool,
    pub dish_description: String,
    pub total_nutrition: NutritionTotals,
    pub nutrition_breakdown: Vec<NutritionBreakdown>,
    pub analyzed_at: DateTime<Utc>,
}

/// Errors that can occur during dish analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    EmptyDescription,
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::EmptyDescription => write!(f, "Dish description is required"),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl NutritionTotals {
    fn add(&mut self, item: &NutritionBreakdown) {
        self.calories += item.calories;
        self.protein += item.protein;
        self.fiber += item.fiber;
        self.carbs += item.carbs;
        self.fats += item.fats;
    }
}

/// Analyze a dish description
///
/// Foods missing from the table go to `estimator`; when it fails, generic default values
/// are used so one unknown food never fails the whole dish.
pub async fn analyze_dish(
    description: &str,
    estimator: &dyn NutritionEstimator,
) -> Result<DishAnalysis, AnalysisError> {
    if description.is_empty() {
        return Err(AnalysisError::EmptyDescription);
    }

    let items = parse_dish_input(description);
    info!(
        "Analyzing dish '{}' with {} parsed items",
        description,
        items.len()
    );
    if items.iter().any(ParsedFoodItem::is_whole_portion) {
        debug!("No food items recognized in '{}', analyzing it as one portion", description);
    }

    let mut total_nutrition = NutritionTotals::default();
    let mut nutrition_breakdown = Vec::with_capacity(items.len());

    for item in &items {
        let food_name = item.name.trim().to_lowercase();
        let facts = match find_nutrition(&food_name) {
            Some(record) => NutritionFacts::from(record),
            None => match estimator.estimate(&food_name).await {
                Ok(facts) => facts,
                Err(e) => {
                    warn!("Nutrition estimate for '{}' failed: {}", food_name, e);
                    NutritionFacts::default_estimate(&food_name)
                }
            },
        };

        let breakdown = scale_nutrition(&food_name, item, &facts);
        total_nutrition.add(&breakdown);
        nutrition_breakdown.push(breakdown);
    }

    info!(
        "Dish '{}' totals {} kcal over {} items",
        description,
        total_nutrition.calories,
        nutrition_breakdown.len()
    );

    Ok(DishAnalysis {
        success: true,
        dish_description: description.to_string(),
        total_nutrition,
        nutrition_breakdown,
        analyzed_at: Utc::now(),
    })
}

/// Scale one serving's nutrition values to a parsed item's quantity
///
/// A zero quantity counts as one. Calories are rounded to whole numbers, everything else
/// to two decimals.
pub fn scale_nutrition(
    food_name: &str,
    item: &ParsedFoodItem,
    facts: &NutritionFacts,
) -> NutritionBreakdown {
    let quantity = if item.quantity == 0.0 || item.quantity.is_nan() {
        1.0
    } else {
        item.quantity
    };
    let multiplier = serving_multiplier(quantity, facts.serving_size.as_deref());

    NutritionBreakdown {
        name: food_name.to_string(),
        quantity: format!("{} {}", quantity, item.unit),
        calories: round_half_up(facts.calories * multiplier),
        protein: round_to_hundredths(facts.protein * multiplier),
        fiber: round_to_hundredths(facts.fiber * multiplier),
        carbs: round_to_hundredths(facts.carbs * multiplier),
        fats: round_to_hundredths(facts.fats * multiplier),
    }
}

/// Format an analysis for terminal display
pub fn format_analysis_for_display(analysis: &DishAnalysis) -> String {
    let mut output = String::new();
    output.push_str(&format!("🍽️ {}\n\n", analysis.dish_description));

    for (i, item) in analysis.nutrition_breakdown.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} ({}): {} kcal, protein {}g, fiber {}g, carbs {}g, fats {}g\n",
            i + 1,
            item.name,
            item.quantity,
            item.calories,
            item.protein,
            item.fiber,
            item.carbs,
            item.fats
        ));
    }

    let totals = &analysis.total_nutrition;
    output.push_str(&format!(
        "\n📊 Total: {} kcal, protein {:.2}g, fiber {:.2}g, carbs {:.2}g, fats {:.2}g\n",
        totals.calories, totals.protein, totals.fiber, totals.carbs, totals.fats
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dish_model::ServingUnit;
    use crate::nutrition_estimator::OfflineNutritionEstimator;

    #[test]
    fn test_scale_nutrition_per_gram_serving() {
        let item = ParsedFoodItem::new("chicken breast", 500.0, ServingUnit::Gram);
        let facts = NutritionFacts::from(find_nutrition("chicken breast").unwrap());
        let scaled = scale_nutrition("chicken breast", &item, &facts);

        assert_eq!(scaled.quantity, "500 gram");
        assert_eq!(scaled.calories, 825.0);
        assert_eq!(scaled.protein, 155.0);
        assert_eq!(scaled.fats, 18.0);
    }

    #[test]
    fn test_scale_nutrition_zero_quantity_counts_as_one() {
        let item = ParsedFoodItem::new("egg", 0.0, ServingUnit::Piece);
        let facts = NutritionFacts::from(find_nutrition("egg").unwrap());
        let scaled = scale_nutrition("egg", &item, &facts);

        assert_eq!(scaled.quantity, "1 piece");
        assert_eq!(scaled.calories, 70.0);
    }

    #[tokio::test]
    async fn test_empty_description_rejected() {
        let result = analyze_dish("", &OfflineNutritionEstimator).await;
        assert_eq!(result, Err(AnalysisError::EmptyDescription));
    }

    #[tokio::test]
    async fn test_format_for_display() {
        let analysis = analyze_dish("3 cups rice", &OfflineNutritionEstimator)
            .await
            .unwrap();
        let text = format_analysis_for_display(&analysis);

        assert!(text.contains("1. rice (3 cup): 615 kcal"));
        assert!(text.contains("Total: 615 kcal"));
    }
}
