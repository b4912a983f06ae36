//! End-to-end dish analysis: parsing, table lookup, estimation and scaling together

use std::sync::Mutex;

use async_trait::async_trait;
use mealmind::ai_errors::AiError;
use mealmind::dish_analysis::{analyze_dish, AnalysisError};
use mealmind::nutrition_data::NutritionFacts;
use mealmind::nutrition_estimator::{NutritionEstimator, OfflineNutritionEstimator};

/// Estimator that knows a single food and records every request
struct RecordingEstimator {
    requested: Mutex<Vec<String>>,
}

impl RecordingEstimator {
    fn new() -> Self {
        Self {
            requested: Mutex::new(Vec::new()),
        }
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl NutritionEstimator for RecordingEstimator {
    async fn estimate(&self, food_name: &str) -> Result<NutritionFacts, AiError> {
        self.requested.lock().unwrap().push(food_name.to_string());
        Ok(NutritionFacts {
            name: food_name.to_string(),
            serving_size: Some("1 roti (40g)".to_string()),
            calories: 120.0,
            protein: 3.0,
            fiber: 2.0,
            carbs: 18.0,
            fats: 3.7,
        })
    }
}

struct FailingEstimator;

#[async_trait]
impl NutritionEstimator for FailingEstimator {
    async fn estimate(&self, _food_name: &str) -> Result<NutritionFacts, AiError> {
        Err(AiError::CircuitOpen)
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn test_known_and_estimated_foods() {
    let estimator = RecordingEstimator::new();
    let analysis = analyze_dish("2 Boiled Eggs and 1 Roti", &estimator)
        .await
        .unwrap();

    assert!(analysis.success);
    assert_eq!(analysis.dish_description, "2 Boiled Eggs and 1 Roti");
    // Only the food missing from the table is estimated, lower-cased
    assert_eq!(estimator.requested(), vec!["roti"]);

    let eggs = &analysis.nutrition_breakdown[0];
    assert_eq!(eggs.name, "boiled eggs");
    assert_eq!(eggs.quantity, "2 piece");
    assert_eq!(eggs.calories, 140.0);
    assert_eq!(eggs.protein, 12.0);
    assert_eq!(eggs.fats, 10.0);

    let roti = &analysis.nutrition_breakdown[1];
    assert_eq!(roti.name, "roti");
    assert_eq!(roti.quantity, "1 piece");
    assert_eq!(roti.calories, 120.0);

    let totals = &analysis.total_nutrition;
    assert_eq!(totals.calories, 260.0);
    assert_close(totals.protein, 15.0);
    assert_close(totals.fiber, 2.0);
    assert_close(totals.carbs, 18.8);
    assert_close(totals.fats, 13.7);
}

#[tokio::test]
async fn test_failed_estimate_uses_default_values() {
    let analysis = analyze_dish("1 roti", &FailingEstimator).await.unwrap();

    // Default values are per "100g", so one piece is a hundredth of them
    let roti = &analysis.nutrition_breakdown[0];
    assert_eq!(roti.calories, 1.0);
    assert_eq!(roti.protein, 0.02);
    assert_eq!(roti.fiber, 0.01);
    assert_eq!(roti.carbs, 0.2);
    assert_eq!(roti.fats, 0.02);
}

#[tokio::test]
async fn test_unit_is_ignored_when_scaling() {
    let analysis = analyze_dish("3 cups rice", &OfflineNutritionEstimator)
        .await
        .unwrap();

    let rice = &analysis.nutrition_breakdown[0];
    assert_eq!(rice.quantity, "3 cup");
    assert_eq!(rice.calories, 615.0);
    assert_eq!(rice.carbs, 135.0);
}

#[tokio::test]
async fn test_fallback_portion_is_analyzed() {
    let estimator = RecordingEstimator::new();
    let analysis = analyze_dish("!!!", &estimator).await.unwrap();

    assert_eq!(estimator.requested(), vec!["!!!"]);
    assert_eq!(analysis.nutrition_breakdown.len(), 1);
    assert_eq!(analysis.nutrition_breakdown[0].quantity, "1 portion");
    assert_eq!(analysis.total_nutrition.calories, 120.0);
}

#[tokio::test]
async fn test_empty_description_is_rejected() {
    let err = analyze_dish("", &OfflineNutritionEstimator)
        .await
        .unwrap_err();

    assert_eq!(err, AnalysisError::EmptyDescription);
    assert_eq!(err.to_string(), "Dish description is required");
}

#[tokio::test]
async fn test_analysis_serializes_camel_case() {
    let analysis = analyze_dish("1 apple", &OfflineNutritionEstimator)
        .await
        .unwrap();
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["dishDescription"], "1 apple");
    assert_eq!(json["totalNutrition"]["calories"], 95.0);
    assert_eq!(json["nutritionBreakdown"][0]["name"], "apple");
    assert_eq!(json["nutritionBreakdown"][0]["quantity"], "1 piece");
    assert!(json["analyzedAt"].is_string());
}
