use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use mealmind::ai_client::ChatClient;
use mealmind::ai_config::AiConfig;
use mealmind::dish_analysis::{analyze_dish, format_analysis_for_display};
use mealmind::dish_parser::parse_dish_input;
use mealmind::meal_plan::{generate_meal_plan, MealPlanRequest};
use mealmind::nutrition_calculator::{
    calculate_bmr, calculate_tdee, target_calories, ActivityLevel, Gender, Goal,
};
use mealmind::nutrition_estimator::{
    AiNutritionEstimator, NutritionEstimator, OfflineNutritionEstimator,
};

#[derive(Parser)]
#[command(name = "mealmind", version, about = "Dish nutrition analysis and meal planning")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a dish description into food items
    Parse {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// Estimate the nutrition of a dish description
    Analyze {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
        /// Print a readable summary instead of JSON
        #[arg(long)]
        summary: bool,
        /// Never call the AI API; unknown foods get default values
        #[arg(long)]
        offline: bool,
    },
    /// Compute BMR, TDEE and a goal calorie target
    Targets {
        #[arg(long)]
        age: u32,
        /// Height in centimeters
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        #[arg(long, default_value = "sedentary")]
        activity: String,
        #[arg(long, default_value = "male")]
        gender: String,
        #[arg(long, default_value = "maintenance")]
        goal: String,
    },
    /// Generate a 7-day meal plan with the AI model
    MealPlan {
        #[arg(long)]
        age: u32,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        activity: String,
        #[arg(long)]
        diet: String,
        #[arg(long)]
        goal: String,
        /// Comma-separated ingredients to leave out
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (may carry RUST_LOG)
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { description } => {
            let items = parse_dish_input(&description.join(" "));
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Command::Analyze {
            description,
            summary,
            offline,
        } => {
            let estimator = build_estimator(offline)?;
            let analysis = analyze_dish(&description.join(" "), estimator.as_ref()).await?;
            if summary {
                print!("{}", format_analysis_for_display(&analysis));
            } else {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            }
        }
        Command::Targets {
            age,
            height,
            weight,
            activity,
            gender,
            goal,
        } => {
            let bmr = calculate_bmr(weight, height, age, Gender::from(gender.as_str()));
            let tdee = calculate_tdee(bmr, ActivityLevel::from(activity.as_str()));
            let target = target_calories(tdee, Goal::from(goal.as_str()));
            println!(
                "{}",
                serde_json::json!({ "bmr": bmr, "tdee": tdee, "targetCalories": target })
            );
        }
        Command::MealPlan {
            age,
            height,
            weight,
            activity,
            diet,
            goal,
            exclude,
        } => {
            let client = ChatClient::new(AiConfig::from_env()?)?;
            let request = MealPlanRequest {
                age: Some(age),
                height: Some(height),
                weight: Some(weight),
                activity_level: Some(activity),
                diet_preference: Some(diet),
                goal: Some(goal),
                exclude_ingredients: exclude,
            };
            let plan = generate_meal_plan(&client, &request).await?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
    }

    Ok(())
}

/// AI-backed estimator when an API key is configured, offline defaults otherwise
fn build_estimator(offline: bool) -> Result<Box<dyn NutritionEstimator>> {
    if offline {
        info!("Offline mode, unknown foods get default nutrition values");
        return Ok(Box::new(OfflineNutritionEstimator));
    }

    match AiConfig::from_env() {
        Ok(config) => {
            info!("Using {} at {} for nutrition estimates", config.model, config.base_url);
            let client = Arc::new(ChatClient::new(config)?);
            Ok(Box::new(AiNutritionEstimator::new(client)))
        }
        Err(e) => {
            warn!("{e}; falling back to offline nutrition estimates");
            Ok(Box::new(OfflineNutritionEstimator))
        }
    }
}
