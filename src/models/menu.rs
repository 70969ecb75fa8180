//! Menu model
//!
//! A menu serves a chosen amount of each of its recipes.

use serde::{Deserialize, Serialize};

use crate::nutrition::Unit;

/// A menu of recipe servings, in declared order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub recipes: Vec<MenuRecipe>,
    pub notes: Option<String>,
}

/// How much of a recipe a menu serves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecipe {
    pub recipe_id: i64,
    pub serving_amount: f64,
    pub serving_unit: Unit,
}

impl MenuRecipe {
    pub fn new(recipe_id: i64, serving_amount: f64, serving_unit: Unit) -> Self {
        Self {
            recipe_id,
            serving_amount,
            serving_unit,
        }
    }
}
