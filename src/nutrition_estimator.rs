//! # Nutrition Estimator Module
//!
//! Estimates nutrition values for foods missing from the built-in table.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::ai_client::ChatClient;
use crate::ai_errors::AiError;
use crate::nutrition_data::NutritionFacts;

pub const ESTIMATE_SYSTEM_PROMPT: &str = "You are a nutrition expert. Return only JSON with the following format: {name: string, serving_size: string, calories: number, protein: number, fiber: number, carbs: number, fats: number}. Provide realistic nutritional values based on common food databases. Do not include any text outside the JSON.";

pub const ESTIMATE_TEMPERATURE: f32 = 0.3;

/// Source of nutrition values for foods the built-in table does not know
#[async_trait]
pub trait NutritionEstimator: Send + Sync {
    /// Nutrition values for one standard serving of `food_name`
    async fn estimate(&self, food_name: &str) -> Result<NutritionFacts, AiError>;
}

/// User prompt asking for one food's nutrition values
pub fn estimate_prompt(food_name: &str) -> String {
    format!(
        "Provide nutritional information for {food_name}. Give typical values per standard serving size."
    )
}

/// Estimator backed by a chat-completions model
pub struct AiNutritionEstimator {
    client: Arc<ChatClient>,
}

impl AiNutritionEstimator {
    pub fn new(client: Arc<ChatClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NutritionEstimator for AiNutritionEstimator {
    async fn estimate(&self, food_name: &str) -> Result<NutritionFacts, AiError> {
        info!("Estimating nutrition for '{}' with AI", food_name);

        let mut facts: NutritionFacts = self
            .client
            .complete_json(
                ESTIMATE_SYSTEM_PROMPT,
                &estimate_prompt(food_name),
                ESTIMATE_TEMPERATURE,
            )
            .await?;

        if facts.name.trim().is_empty() {
            facts.name = food_name.to_string();
        }
        debug!("AI estimate for '{}': {:?}", food_name, facts);
        Ok(facts)
    }
}

/// Estimator that never leaves the process: every food gets the generic default values
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNutritionEstimator;

#[async_trait]
impl NutritionEstimator for OfflineNutritionEstimator {
    async fn estimate(&self, food_name: &str) -> Result<NutritionFacts, AiError> {
        debug!("Offline estimate for '{}'", food_name);
        Ok(NutritionFacts::default_estimate(food_name))
    }
}
