//! Error types
//!
//! All failures raised by the nutrition engine.

use thiserror::Error;

/// Nutrition engine error types
#[derive(Debug, Error, PartialEq)]
pub enum NutritionError {
    #[error("Malformed measure '{0}': expected \"<number> <unit>\"")]
    Parse(String),

    #[error("Unsupported unit '{0}' (expected g, mg, mcg or ml)")]
    UnsupportedUnit(String),

    #[error("Volume measure requires a density but none was provided")]
    MissingDensity,

    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(i64),

    #[error("Unknown recipe: {0}")]
    UnknownRecipe(i64),

    #[error("Unknown menu: {0}")]
    UnknownMenu(i64),

    #[error("Unknown daily plan: {0}")]
    UnknownPlan(i64),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl NutritionError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        NutritionError::Validation(msg.into())
    }
}

/// Result type for nutrition operations
pub type NutritionResult<T> = Result<T, NutritionError>;
