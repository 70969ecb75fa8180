//! Data models
//!
//! Rust structs for ingredients, recipes, menus, daily plans and the user
//! profile, plus the shared nutrition totals.

mod catalog;
mod daily_plan;
mod ingredient;
mod menu;
mod nutrition;
mod recipe;
mod user;

pub use catalog::{Catalog, CatalogData, Lookup};
pub use daily_plan::{DailyPlan, MealType, PlanMenu};
pub use ingredient::{NutrientProfile, NutrientValue};
pub use menu::{Menu, MenuRecipe};
pub use nutrition::{keys, NutrientTotals, NutritionSummary};
pub use recipe::{Recipe, RecipeIngredient};
pub use user::{RiskLevel, RiskTable, UserProfile};
