//! Recipe model
//!
//! A recipe is an ordered list of ingredient amounts.

use serde::{Deserialize, Serialize};

use crate::nutrition::Unit;

/// A recipe and the ingredients it uses, in declared order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    /// Grams per milliliter of the prepared dish, for menus serving it by volume
    #[serde(default)]
    pub density: Option<f64>,
    pub ingredients: Vec<RecipeIngredient>,
    pub notes: Option<String>,
}

/// An ingredient used in a recipe with its amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: i64,
    pub amount: f64,
    pub unit: Unit,
}

impl RecipeIngredient {
    pub fn new(ingredient_id: i64, amount: f64, unit: Unit) -> Self {
        Self {
            ingredient_id,
            amount,
            unit,
        }
    }
}
