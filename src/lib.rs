//! DASH Planner Library
//!
//! Nutrition aggregation for recipes, menus and daily plans, with DASH diet
//! and kidney-stone oxalate assessment.

pub mod assessment;
pub mod config;
pub mod error;
pub mod models;
pub mod nutrition;
pub mod tools;

pub use error::{NutritionError, NutritionResult};
