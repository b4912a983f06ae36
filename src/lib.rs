//! # MealMind
//!
//! Dish analysis and meal planning: parses free-form dish descriptions into food items,
//! prices them against a built-in nutrition table or an AI estimate, and generates
//! calorie-targeted meal plans.

pub mod ai_client;
pub mod ai_config;
pub mod ai_errors;
pub mod circuit_breaker;
pub mod dish_analysis;
pub mod dish_model;
pub mod dish_parser;
pub mod dish_patterns;
pub mod meal_plan;
pub mod nutrition_calculator;
pub mod nutrition_data;
pub mod nutrition_estimator;
