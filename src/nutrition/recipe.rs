//! Recipe nutrition calculator
//!
//! Scales each ingredient's per-serving profile to the amount a recipe uses
//! and sums the results.

use std::collections::BTreeMap;

use serde::Serialize;

use super::converter::amount_to_grams;
use super::units::Unit;
use crate::error::{NutritionError, NutritionResult};
use crate::models::{Lookup, NutrientProfile, NutrientTotals, NutritionSummary, Recipe};

/// One ingredient's profile scaled to a consumed amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledContribution {
    pub ingredient_id: i64,
    pub consumed_grams: f64,
    pub scaling_factor: f64,
    pub nutrients: NutrientTotals,
    pub oxalate_mg: f64,
}

/// What the recipe calculator should report besides totals
#[derive(Debug, Clone, Default)]
pub struct RecipeOptions {
    /// Emit one detail row per non-zero ingredient
    pub include_details: bool,
    /// Nutrient keys to break down by ingredient
    pub track: Vec<String>,
}

impl RecipeOptions {
    pub fn with_details() -> Self {
        Self {
            include_details: true,
            track: Vec::new(),
        }
    }

    pub fn tracking<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_details: false,
            track: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// Per-ingredient row for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientDetail {
    pub ingredient_id: i64,
    pub name: String,
    pub amount: f64,
    pub unit: Unit,
    pub consumed_grams: f64,
    pub scaling_factor: f64,
    pub nutrients: NutrientTotals,
    /// Display only; never folded back into the nutrient totals
    pub oxalates: f64,
}

/// Result of a recipe calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeNutrition {
    pub recipe_id: i64,
    #[serde(flatten)]
    pub summary: NutritionSummary,
    /// Grams of all ingredients as prepared
    pub total_grams: f64,
    /// Display unit per nutrient key (first unit seen)
    pub units: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<IngredientDetail>,
    /// nutrient -> ingredient id -> scaled amount
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub contributions: BTreeMap<String, BTreeMap<i64, f64>>,
}

fn resolve<'a, S>(ingredients: &'a S, id: i64) -> NutritionResult<&'a NutrientProfile>
where
    S: Lookup<NutrientProfile> + ?Sized,
{
    ingredients
        .find(id)
        .ok_or(NutritionError::UnknownIngredient(id))
}

/// Scale one ingredient's per-serving profile to a consumed amount
///
/// `scaling_factor = consumed_grams / grams_per_serving`; every nutrient
/// amount is multiplied by it and oxalate mass is `oxalate_per_gram *
/// consumed_grams`.
pub fn scale_ingredient(
    profile: &NutrientProfile,
    amount: f64,
    unit: Unit,
) -> NutritionResult<ScaledContribution> {
    if !amount.is_finite() {
        return Err(NutritionError::validation(format!(
            "ingredient {} has a non-finite amount",
            profile.id
        )));
    }

    let grams_per_serving = profile.grams_per_serving()?;
    let consumed_grams = amount_to_grams(amount, unit, profile.density)?;
    let scaling_factor = consumed_grams / grams_per_serving;

    let nutrients = profile
        .nutrients
        .iter()
        .map(|(key, value)| (key.clone(), value.amount() * scaling_factor))
        .collect();

    Ok(ScaledContribution {
        ingredient_id: profile.id,
        consumed_grams,
        scaling_factor,
        nutrients,
        oxalate_mg: profile.oxalate_per_gram * consumed_grams,
    })
}

/// Total mass of a recipe as prepared, summing every ingredient in grams
pub fn recipe_total_grams<S>(recipe: &Recipe, ingredients: &S) -> NutritionResult<f64>
where
    S: Lookup<NutrientProfile> + ?Sized,
{
    let mut total = 0.0;
    for item in recipe.ingredients.iter().filter(|i| i.amount != 0.0) {
        let profile = resolve(ingredients, item.ingredient_id)?;
        total += amount_to_grams(item.amount, item.unit, profile.density)?;
    }
    Ok(total)
}

/// Calculate total nutrition for a recipe based on its ingredients
///
/// Ingredients are processed in declared order. Zero-amount entries are
/// skipped entirely; an unknown ingredient id fails the whole calculation.
pub fn calculate_recipe_nutrition<S>(
    recipe: &Recipe,
    ingredients: &S,
    options: &RecipeOptions,
) -> NutritionResult<RecipeNutrition>
where
    S: Lookup<NutrientProfile> + ?Sized,
{
    let mut result = RecipeNutrition {
        recipe_id: recipe.id,
        ..Default::default()
    };

    for item in &recipe.ingredients {
        if item.amount == 0.0 {
            continue;
        }

        let profile = resolve(ingredients, item.ingredient_id)?;
        let scaled = scale_ingredient(profile, item.amount, item.unit)?;

        tracing::debug!(
            recipe_id = recipe.id,
            ingredient_id = profile.id,
            consumed_grams = scaled.consumed_grams,
            scaling_factor = scaled.scaling_factor,
            "scaled ingredient"
        );

        for (key, amount) in scaled.nutrients.iter() {
            result.summary.totals.add_amount(key, amount);
            if let Some(value) = profile.nutrients.get(key) {
                result
                    .units
                    .entry(key.to_string())
                    .or_insert_with(|| value.display_unit().to_string());
            }
        }
        result.summary.oxalate_mg += scaled.oxalate_mg;
        result.total_grams += scaled.consumed_grams;

        for key in &options.track {
            if scaled.nutrients.contains(key) {
                *result
                    .contributions
                    .entry(key.clone())
                    .or_default()
                    .entry(profile.id)
                    .or_insert(0.0) += scaled.nutrients.get(key);
            }
        }

        if options.include_details {
            result.details.push(IngredientDetail {
                ingredient_id: profile.id,
                name: profile.name.clone(),
                amount: item.amount,
                unit: item.unit,
                consumed_grams: scaled.consumed_grams,
                scaling_factor: scaled.scaling_factor,
                nutrients: scaled.nutrients,
                oxalates: scaled.oxalate_mg,
            });
        }
    }

    Ok(result)
}
