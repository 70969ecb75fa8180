//! DASH Planner tools module
//!
//! Report entry points combining aggregation and assessment.

pub mod reports;

pub use reports::{
    daily_plan_report, exists, list_catalog, menu_report, recipe_report, CatalogEntry,
    DailyPlanReport, ListCatalogResponse, MenuReport, RecipeReport,
};
