//! # Meal Plan Module
//!
//! Personalized meal plans: validates the user's profile, derives a daily calorie target
//! from BMR, TDEE and goal, and asks the AI model for a plan that meets it.

use log::info;
use serde::{Deserialize, Serialize};

use crate::ai_client::ChatClient;
use crate::ai_errors::AiError;
use crate::nutrition_calculator::{
    calculate_bmr, calculate_tdee, target_calories, ActivityLevel, Gender, Goal,
};

pub const MEAL_PLAN_SYSTEM_PROMPT: &str = "You are a professional nutritionist and meal planner. Create healthy, balanced meal plans that meet the specified criteria. Always respond with valid JSON format only.";

pub const MEAL_PLAN_TEMPERATURE: f32 = 0.7;

/// Profile and preferences a meal plan is generated for
///
/// Every field except `exclude_ingredients` is required; zero numbers and empty strings
/// count as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    pub age: Option<u32>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    pub activity_level: Option<String>,
    pub diet_preference: Option<String>,
    pub goal: Option<String>,
    #[serde(default)]
    pub exclude_ingredients: Vec<String>,
}

/// Energy figures behind a meal plan, in kcal/day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieTargets {
    pub bmr: i64,
    pub tdee: i64,
    pub target_calories: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub time: String,
    pub ingredients: Vec<String>,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealPlanSummary {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
}

/// A generated meal plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MealPlan {
    pub daily_calorie_target: f64,
    pub diet_preference: String,
    pub goal: String,
    pub meals: Vec<Meal>,
    pub summary: MealPlanSummary,
}

/// Errors that can occur while generating a meal plan
#[derive(Debug, Clone, PartialEq)]
pub enum MealPlanError {
    /// Required profile fields that were absent, in request order
    MissingFields(Vec<&'static str>),
    Ai(AiError),
}

impl std::fmt::Display for MealPlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MealPlanError::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            MealPlanError::Ai(e) => write!(f, "Failed to generate meal plan: {e}"),
        }
    }
}

impl std::error::Error for MealPlanError {}

impl From<AiError> for MealPlanError {
    fn from(err: AiError) -> Self {
        MealPlanError::Ai(err)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl MealPlanRequest {
    /// Names (as sent over the wire) of the required fields that are missing
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.age.map_or(true, |age| age == 0) {
            missing.push("age");
        }
        if self.height.map_or(true, |h| h == 0.0 || h.is_nan()) {
            missing.push("height");
        }
        if self.weight.map_or(true, |w| w == 0.0 || w.is_nan()) {
            missing.push("weight");
        }
        if is_blank(&self.activity_level) {
            missing.push("activityLevel");
        }
        if is_blank(&self.diet_preference) {
            missing.push("dietPreference");
        }
        if is_blank(&self.goal) {
            missing.push("goal");
        }
        missing
    }

    /// Fail with every missing field at once
    pub fn validate(&self) -> Result<(), MealPlanError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MealPlanError::MissingFields(missing))
        }
    }

    /// BMR, TDEE and the goal-adjusted daily target
    ///
    /// The request carries no sex, so the male BMR equation is used.
    pub fn calorie_targets(&self) -> Result<CalorieTargets, MealPlanError> {
        self.validate()?;

        let (Some(age), Some(height), Some(weight)) = (self.age, self.height, self.weight) else {
            return Err(MealPlanError::MissingFields(self.missing_fields()));
        };
        let activity = ActivityLevel::from(self.activity_level.as_deref().unwrap_or_default());
        let goal = Goal::from(self.goal.as_deref().unwrap_or_default());

        let bmr = calculate_bmr(weight, height, age, Gender::Male);
        let tdee = calculate_tdee(bmr, activity);

        Ok(CalorieTargets {
            bmr,
            tdee,
            target_calories: target_calories(tdee, goal),
        })
    }
}

/// User prompt for a 7-day plan
pub fn build_meal_plan_prompt(
    target_calories: i64,
    diet_preference: &str,
    exclude_ingredients: &[String],
) -> String {
    let excluded = if exclude_ingredients.is_empty() {
        "None".to_string()
    } else {
        exclude_ingredients.join(", ")
    };

    format!(
        r#"Create a personalized daily meal plan for 7 days with the following specifications:
- Target daily calories: {target_calories}
- Diet preference: {diet_preference}
- Excluded ingredients: {excluded}

Provide the response in the following JSON format:
{{
  "dailyCalorieTarget": number,
  "dietPreference": string,
  "goal": string,
  "meals": [
    {{
      "name": string,
      "time": string,
      "ingredients": [string],
      "calories": number,
      "protein": number,
      "carbs": number,
      "fats": number
    }}
  ],
  "summary": {{
    "totalCalories": number,
    "totalProtein": number,
    "totalCarbs": number,
    "totalFats": number
  }}
}}

Make the meals realistic, nutritious, and appropriate for the given diet preference.
Ensure the total calories are close to the target."#
    )
}

/// Validate the request, compute its calorie target and ask the model for a plan
pub async fn generate_meal_plan(
    client: &ChatClient,
    request: &MealPlanRequest,
) -> Result<MealPlan, MealPlanError> {
    let targets = request.calorie_targets()?;
    let diet_preference = request.diet_preference.as_deref().unwrap_or_default();

    info!(
        "Generating meal plan: target {} kcal (BMR {}, TDEE {}), diet '{}'",
        targets.target_calories, targets.bmr, targets.tdee, diet_preference
    );

    let prompt = build_meal_plan_prompt(
        targets.target_calories,
        diet_preference,
        &request.exclude_ingredients,
    );
    let plan = client
        .complete_json(MEAL_PLAN_SYSTEM_PROMPT, &prompt, MEAL_PLAN_TEMPERATURE)
        .await?;

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> MealPlanRequest {
        MealPlanRequest {
            age: Some(30),
            height: Some(175.0),
            weight: Some(70.0),
            activity_level: Some("moderate".to_string()),
            diet_preference: Some("vegetarian".to_string()),
            goal: Some("weight_loss".to_string()),
            exclude_ingredients: vec![],
        }
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let request = MealPlanRequest {
            age: Some(0),
            weight: Some(70.0),
            goal: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            request.missing_fields(),
            vec!["age", "height", "activityLevel", "dietPreference", "goal"]
        );

        let err = request.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: age, height, activityLevel, dietPreference, goal"
        );
    }

    #[test]
    fn test_calorie_targets() {
        let targets = complete_request().calorie_targets().unwrap();
        assert_eq!(targets.bmr, 1649);
        assert_eq!(targets.tdee, 2556);
        assert_eq!(targets.target_calories, 2056);
    }

    #[test]
    fn test_prompt_lists_exclusions() {
        let prompt = build_meal_plan_prompt(2056, "vegetarian", &[]);
        assert!(prompt.contains("- Target daily calories: 2056"));
        assert!(prompt.contains("- Excluded ingredients: None"));
        assert!(prompt.contains("\"dailyCalorieTarget\": number"));

        let prompt =
            build_meal_plan_prompt(2056, "vegan", &["peanuts".to_string(), "soy".to_string()]);
        assert!(prompt.contains("- Excluded ingredients: peanuts, soy"));
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: MealPlanRequest = serde_json::from_str(
            r#"{"age": 30, "height": 175, "weight": 70, "activityLevel": "moderate",
                "dietPreference": "vegetarian", "goal": "weight_loss"}"#,
        )
        .unwrap();
        assert_eq!(request, complete_request());
    }

    #[test]
    fn test_meal_plan_tolerates_missing_fields() {
        let plan: MealPlan = serde_json::from_str(
            r#"{"dailyCalorieTarget": 2056, "meals": [{"name": "Oatmeal", "calories": 350}]}"#,
        )
        .unwrap();
        assert_eq!(plan.daily_calorie_target, 2056.0);
        assert_eq!(plan.meals[0].name, "Oatmeal");
        assert!(plan.meals[0].ingredients.is_empty());
        assert_eq!(plan.summary, MealPlanSummary::default());
    }
}
