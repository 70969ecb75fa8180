//! Nutrition calculation module
//!
//! Handles unit conversions and nutrition aggregation at the recipe, menu
//! and daily plan levels.

pub mod converter;
pub mod daily_plan;
pub mod menu;
pub mod recipe;
pub mod units;

pub use converter::{amount_to_grams, parse_measure, to_grams, Measure};
pub use daily_plan::{
    calculate_daily_plan_nutrition, menu_nutrition_for_plan, sum_across_menus,
    DailyPlanNutrition, MealGroup,
};
pub use menu::{
    calculate_menu_nutrition, recipe_bases_for_menu, scale_recipe_into_menu, MenuNutrition,
    MenuRecipeDetail, RecipeBasis,
};
pub use recipe::{
    calculate_recipe_nutrition, recipe_total_grams, scale_ingredient, IngredientDetail,
    RecipeNutrition, RecipeOptions, ScaledContribution,
};
pub use units::{Unit, UnitCategory};
