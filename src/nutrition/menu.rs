//! Menu nutrition aggregator
//!
//! Scales each recipe's totals to the amount a menu serves and sums them.
//! The menu scale is applied on top of the ingredient-level scale already
//! baked into the recipe totals.

use std::collections::BTreeMap;

use serde::Serialize;

use super::converter::amount_to_grams;
use super::recipe::{
    calculate_recipe_nutrition, recipe_total_grams, RecipeNutrition, RecipeOptions,
};
use crate::error::{NutritionError, NutritionResult};
use crate::models::{Lookup, Menu, MenuRecipe, NutrientProfile, NutritionSummary, Recipe};

/// What a menu needs to know about a recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeBasis {
    pub recipe_id: i64,
    pub name: String,
    /// Totals for the whole recipe as prepared
    pub summary: NutritionSummary,
    /// Grams of all ingredients as prepared
    pub total_grams: f64,
    /// Grams per milliliter of the prepared dish
    pub density: Option<f64>,
}

impl RecipeBasis {
    /// Build a basis from an already computed recipe result
    pub fn from_nutrition(recipe: &Recipe, nutrition: &RecipeNutrition) -> Self {
        Self {
            recipe_id: recipe.id,
            name: recipe.name.clone(),
            summary: nutrition.summary.clone(),
            total_grams: nutrition.total_grams,
            density: recipe.density,
        }
    }

    /// Compute a recipe's totals and mass from its ingredients
    pub fn compute<S>(recipe: &Recipe, ingredients: &S) -> NutritionResult<Self>
    where
        S: Lookup<NutrientProfile> + ?Sized,
    {
        let nutrition =
            calculate_recipe_nutrition(recipe, ingredients, &RecipeOptions::default())?;
        Ok(Self {
            total_grams: recipe_total_grams(recipe, ingredients)?,
            ..Self::from_nutrition(recipe, &nutrition)
        })
    }
}

/// Per-recipe row of a menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuRecipeDetail {
    pub recipe_id: i64,
    pub name: String,
    pub served_grams: f64,
    pub recipe_total_grams: f64,
    pub scaling_factor: f64,
    #[serde(flatten)]
    pub summary: NutritionSummary,
}

/// Result of a menu calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MenuNutrition {
    pub menu_id: i64,
    #[serde(flatten)]
    pub summary: NutritionSummary,
    pub recipes: Vec<MenuRecipeDetail>,
}

/// Scale a recipe's totals to the amount a menu serves
///
/// `scaling_factor = served_grams / recipe_total_grams`, so serving exactly
/// the prepared mass of the recipe yields a factor of 1.
pub fn scale_recipe_into_menu(
    basis: &RecipeBasis,
    entry: &MenuRecipe,
) -> NutritionResult<MenuRecipeDetail> {
    if basis.total_grams <= 0.0 {
        tracing::warn!(recipe_id = basis.recipe_id, "recipe has no ingredient mass");
        return Err(NutritionError::validation(format!(
            "recipe {} has no ingredient mass to scale against",
            basis.recipe_id
        )));
    }
    if !entry.serving_amount.is_finite() {
        return Err(NutritionError::validation(format!(
            "menu serving of recipe {} is not a finite amount",
            basis.recipe_id
        )));
    }

    let served_grams = amount_to_grams(entry.serving_amount, entry.serving_unit, basis.density)?;
    let scaling_factor = served_grams / basis.total_grams;

    tracing::debug!(
        recipe_id = basis.recipe_id,
        served_grams,
        scaling_factor,
        "scaled recipe into menu"
    );

    Ok(MenuRecipeDetail {
        recipe_id: basis.recipe_id,
        name: basis.name.clone(),
        served_grams,
        recipe_total_grams: basis.total_grams,
        scaling_factor,
        summary: basis.summary.scale(scaling_factor),
    })
}

/// Calculate total nutrition for a menu from its recipes' bases
pub fn calculate_menu_nutrition<S>(menu: &Menu, bases: &S) -> NutritionResult<MenuNutrition>
where
    S: Lookup<RecipeBasis> + ?Sized,
{
    let mut result = MenuNutrition {
        menu_id: menu.id,
        ..Default::default()
    };

    for entry in &menu.recipes {
        let basis = bases
            .find(entry.recipe_id)
            .ok_or(NutritionError::UnknownRecipe(entry.recipe_id))?;
        let detail = scale_recipe_into_menu(basis, entry)?;
        result.summary = result.summary.add(&detail.summary);
        result.recipes.push(detail);
    }

    Ok(result)
}

/// Compute the basis of every recipe a menu references
pub fn recipe_bases_for_menu<R, I>(
    menu: &Menu,
    recipes: &R,
    ingredients: &I,
) -> NutritionResult<BTreeMap<i64, RecipeBasis>>
where
    R: Lookup<Recipe> + ?Sized,
    I: Lookup<NutrientProfile> + ?Sized,
{
    let mut bases = BTreeMap::new();
    for entry in &menu.recipes {
        if bases.contains_key(&entry.recipe_id) {
            continue;
        }
        let recipe = recipes
            .find(entry.recipe_id)
            .ok_or(NutritionError::UnknownRecipe(entry.recipe_id))?;
        bases.insert(entry.recipe_id, RecipeBasis::compute(recipe, ingredients)?);
    }
    Ok(bases)
}
