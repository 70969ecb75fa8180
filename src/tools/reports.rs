//! Nutrition reports
//!
//! Use-case functions that compute a level's nutrition and assess it in one
//! go, returning serializable responses for an outer API or CLI.

use serde::Serialize;

use crate::assessment::{assess, AssessmentKind, AssessmentResult};
use crate::models::{Catalog, Lookup};
use crate::nutrition::{
    calculate_daily_plan_nutrition, calculate_menu_nutrition, calculate_recipe_nutrition,
    menu_nutrition_for_plan, recipe_bases_for_menu, DailyPlanNutrition, MenuNutrition,
    RecipeNutrition, RecipeOptions,
};

/// Recipe nutrition with its assessment
#[derive(Debug, Serialize)]
pub struct RecipeReport {
    pub id: i64,
    pub name: String,
    pub nutrition: RecipeNutrition,
    pub assessment: AssessmentResult,
}

/// Menu nutrition with its assessment
#[derive(Debug, Serialize)]
pub struct MenuReport {
    pub id: i64,
    pub name: String,
    pub nutrition: MenuNutrition,
    pub assessment: AssessmentResult,
}

/// Daily plan nutrition with its assessment
#[derive(Debug, Serialize)]
pub struct DailyPlanReport {
    pub id: i64,
    pub name: String,
    pub nutrition: DailyPlanNutrition,
    pub assessment: AssessmentResult,
}

/// One catalog entry for listing
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
}

/// Response for list_catalog
#[derive(Debug, Serialize)]
pub struct ListCatalogResponse {
    pub ingredients: Vec<CatalogEntry>,
    pub recipes: Vec<CatalogEntry>,
    pub menus: Vec<CatalogEntry>,
    pub daily_plans: Vec<CatalogEntry>,
}

// ============================================================================
// Report Tools
// ============================================================================

/// Compute and assess a recipe, with per-ingredient detail rows
pub fn recipe_report(
    catalog: &Catalog,
    id: i64,
    track: &[String],
) -> Result<Option<RecipeReport>, String> {
    let Some(recipe) = catalog.recipes.get(&id) else {
        return Ok(None);
    };

    let options = RecipeOptions {
        include_details: true,
        track: track.to_vec(),
    };
    let nutrition = calculate_recipe_nutrition(recipe, catalog, &options)
        .map_err(|e| format!("Failed to calculate recipe {}: {}", id, e))?;

    let assessment = assess(
        &nutrition.summary.totals,
        nutrition.summary.oxalate_mg,
        AssessmentKind::Recipe,
        &catalog.user,
        &catalog.risk_table,
    )
    .map_err(|e| format!("Failed to assess recipe {}: {}", id, e))?;

    Ok(Some(RecipeReport {
        id,
        name: recipe.name.clone(),
        nutrition,
        assessment,
    }))
}

/// Compute and assess a menu
pub fn menu_report(catalog: &Catalog, id: i64) -> Result<Option<MenuReport>, String> {
    let Some(menu) = catalog.menus.get(&id) else {
        return Ok(None);
    };

    let bases = recipe_bases_for_menu(menu, catalog, catalog)
        .map_err(|e| format!("Failed to calculate recipes of menu {}: {}", id, e))?;
    let nutrition = calculate_menu_nutrition(menu, &bases)
        .map_err(|e| format!("Failed to calculate menu {}: {}", id, e))?;

    let assessment = assess(
        &nutrition.summary.totals,
        nutrition.summary.oxalate_mg,
        AssessmentKind::Menu,
        &catalog.user,
        &catalog.risk_table,
    )
    .map_err(|e| format!("Failed to assess menu {}: {}", id, e))?;

    Ok(Some(MenuReport {
        id,
        name: menu.name.clone(),
        nutrition,
        assessment,
    }))
}

/// Compute and assess a daily plan
pub fn daily_plan_report(catalog: &Catalog, id: i64) -> Result<Option<DailyPlanReport>, String> {
    let Some(plan) = catalog.daily_plans.get(&id) else {
        return Ok(None);
    };

    let menus = menu_nutrition_for_plan(plan, catalog, catalog, catalog)
        .map_err(|e| format!("Failed to calculate menus of plan {}: {}", id, e))?;
    let nutrition = calculate_daily_plan_nutrition(plan, &menus)
        .map_err(|e| format!("Failed to calculate plan {}: {}", id, e))?;

    let assessment = assess(
        &nutrition.summary.totals,
        nutrition.summary.oxalate_mg,
        AssessmentKind::DailyPlan,
        &catalog.user,
        &catalog.risk_table,
    )
    .map_err(|e| format!("Failed to assess plan {}: {}", id, e))?;

    Ok(Some(DailyPlanReport {
        id,
        name: plan.name.clone(),
        nutrition,
        assessment,
    }))
}

/// List what the catalog holds
pub fn list_catalog(catalog: &Catalog) -> ListCatalogResponse {
    fn entries<'a, T: 'a>(
        items: impl Iterator<Item = (&'a i64, &'a T)>,
        name: impl Fn(&T) -> &str,
    ) -> Vec<CatalogEntry> {
        items
            .map(|(id, item)| CatalogEntry {
                id: *id,
                name: name(item).to_string(),
            })
            .collect()
    }

    ListCatalogResponse {
        ingredients: entries(catalog.ingredients.iter(), |i| &i.name),
        recipes: entries(catalog.recipes.iter(), |r| &r.name),
        menus: entries(catalog.menus.iter(), |m| &m.name),
        daily_plans: entries(catalog.daily_plans.iter(), |p| &p.name),
    }
}

/// Whether an id exists in the catalog for the given record type
pub fn exists<T>(catalog: &Catalog, id: i64) -> bool
where
    Catalog: Lookup<T>,
{
    Lookup::<T>::find(catalog, id).is_some()
}
