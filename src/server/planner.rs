//! Meal plan generation seam.
//!
//! The plan itself is produced by an external language-model agent that reads
//! the current snapshot. This module only defines the contract the HTTP
//! handler calls and the response shape it returns.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One food in a generated plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanFood {
    pub food: String,
    /// Portion in grams, free text (e.g. "800g (160g per serving)")
    pub weight: String,
    pub macros: String,
    pub food_explanation: String,
    pub food_category: FoodCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub plan: Vec<MealPlanFood>,
    /// Markdown
    pub plan_explanation: String,
    /// Markdown
    pub plan_preparation: String,
}

#[derive(Debug)]
pub struct PlannerError(pub String);

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Meal plan generation failed: {}", self.0)
    }
}

impl std::error::Error for PlannerError {}

/// Produces a meal plan from the current foods and macro targets.
pub trait MealPlanner: Send + Sync {
    fn generate_meal_plan(&self) -> BoxFuture<'_, Result<MealPlanResponse, PlannerError>>;
}
