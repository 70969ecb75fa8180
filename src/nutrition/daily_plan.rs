//! Daily plan nutrition aggregator
//!
//! Sums menu totals across a day. Menus in a plan are eaten in full, so no
//! further scaling happens at this level.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::menu::{calculate_menu_nutrition, recipe_bases_for_menu, MenuNutrition};
use crate::error::{NutritionError, NutritionResult};
use crate::models::{DailyPlan, Lookup, MealType, Menu, NutrientProfile, NutritionSummary, Recipe};

/// Menus of one meal type with their subtotal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealGroup {
    pub meal_type: MealType,
    pub menu_ids: Vec<i64>,
    #[serde(flatten)]
    pub summary: NutritionSummary,
}

/// Result of a daily plan calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPlanNutrition {
    pub plan_id: i64,
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub summary: NutritionSummary,
    /// Display grouping; does not affect the plan totals
    pub meals: Vec<MealGroup>,
}

/// Sum menu summaries in the order given
pub fn sum_across_menus<'a, I>(menus: I) -> NutritionSummary
where
    I: IntoIterator<Item = &'a NutritionSummary>,
{
    menus
        .into_iter()
        .fold(NutritionSummary::zero(), |acc, s| acc.add(s))
}

/// Calculate total nutrition for a daily plan from its menus' results
pub fn calculate_daily_plan_nutrition<S>(
    plan: &DailyPlan,
    menus: &S,
) -> NutritionResult<DailyPlanNutrition>
where
    S: Lookup<MenuNutrition> + ?Sized,
{
    let mut resolved = Vec::with_capacity(plan.menus.len());
    for entry in &plan.menus {
        let nutrition = menus
            .find(entry.menu_id)
            .ok_or(NutritionError::UnknownMenu(entry.menu_id))?;
        resolved.push((entry, nutrition));
    }

    let summary = sum_across_menus(resolved.iter().map(|(_, n)| &n.summary));

    let mut groups: BTreeMap<MealType, MealGroup> = BTreeMap::new();
    for (entry, nutrition) in &resolved {
        let group = groups.entry(entry.meal_type).or_insert_with(|| MealGroup {
            meal_type: entry.meal_type,
            menu_ids: Vec::new(),
            summary: NutritionSummary::zero(),
        });
        group.menu_ids.push(entry.menu_id);
        group.summary = group.summary.add(&nutrition.summary);
    }

    Ok(DailyPlanNutrition {
        plan_id: plan.id,
        date: plan.date,
        summary,
        meals: groups.into_values().collect(),
    })
}

/// Compute the nutrition of every menu a plan references
pub fn menu_nutrition_for_plan<M, R, I>(
    plan: &DailyPlan,
    menus: &M,
    recipes: &R,
    ingredients: &I,
) -> NutritionResult<BTreeMap<i64, MenuNutrition>>
where
    M: Lookup<Menu> + ?Sized,
    R: Lookup<Recipe> + ?Sized,
    I: Lookup<NutrientProfile> + ?Sized,
{
    let mut out = BTreeMap::new();
    for entry in &plan.menus {
        if out.contains_key(&entry.menu_id) {
            continue;
        }
        let menu = menus
            .find(entry.menu_id)
            .ok_or(NutritionError::UnknownMenu(entry.menu_id))?;
        let bases = recipe_bases_for_menu(menu, recipes, ingredients)?;
        out.insert(entry.menu_id, calculate_menu_nutrition(menu, &bases)?);
    }
    Ok(out)
}
