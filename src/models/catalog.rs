//! Catalog snapshot
//!
//! Read-only snapshot of ingredients, recipes, menus and daily plans that is
//! handed to the calculators instead of any shared global state.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{DailyPlan, Menu, NutrientProfile, Recipe, RiskTable, UserProfile};

/// Lookup of a record by its identifier
pub trait Lookup<T> {
    fn find(&self, id: i64) -> Option<&T>;
}

impl<T> Lookup<T> for HashMap<i64, T> {
    fn find(&self, id: i64) -> Option<&T> {
        self.get(&id)
    }
}

impl<T> Lookup<T> for BTreeMap<i64, T> {
    fn find(&self, id: i64) -> Option<&T> {
        self.get(&id)
    }
}

/// On-disk shape of a catalog: plain lists of records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub ingredients: Vec<NutrientProfile>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub menus: Vec<Menu>,
    #[serde(default)]
    pub daily_plans: Vec<DailyPlan>,
    #[serde(default)]
    pub user: UserProfile,
    #[serde(default)]
    pub risk_table: RiskTable,
}

/// Indexed catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub ingredients: BTreeMap<i64, NutrientProfile>,
    pub recipes: BTreeMap<i64, Recipe>,
    pub menus: BTreeMap<i64, Menu>,
    pub daily_plans: BTreeMap<i64, DailyPlan>,
    pub user: UserProfile,
    pub risk_table: RiskTable,
}

impl Catalog {
    /// Parse a catalog from its JSON form
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Ok(Self::from(data))
    }
}

impl From<CatalogData> for Catalog {
    fn from(data: CatalogData) -> Self {
        Self {
            ingredients: data.ingredients.into_iter().map(|i| (i.id, i)).collect(),
            recipes: data.recipes.into_iter().map(|r| (r.id, r)).collect(),
            menus: data.menus.into_iter().map(|m| (m.id, m)).collect(),
            daily_plans: data.daily_plans.into_iter().map(|p| (p.id, p)).collect(),
            user: data.user,
            risk_table: data.risk_table,
        }
    }
}

impl Lookup<NutrientProfile> for Catalog {
    fn find(&self, id: i64) -> Option<&NutrientProfile> {
        self.ingredients.get(&id)
    }
}

impl Lookup<Recipe> for Catalog {
    fn find(&self, id: i64) -> Option<&Recipe> {
        self.recipes.get(&id)
    }
}

impl Lookup<Menu> for Catalog {
    fn find(&self, id: i64) -> Option<&Menu> {
        self.menus.get(&id)
    }
}

impl Lookup<DailyPlan> for Catalog {
    fn find(&self, id: i64) -> Option<&DailyPlan> {
        self.daily_plans.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_indexes_records() {
        let catalog = Catalog::from_json_str(
            r#"{
                "ingredients": [
                    {"id": 1, "name": "Oats", "brand": "Acme", "serving_amount": "40 g",
                     "nutrients": {"calories": 150}}
                ],
                "recipes": [
                    {"id": 10, "name": "Porridge",
                     "ingredients": [{"ingredient_id": 1, "amount": 80, "unit": "g"}]}
                ],
                "user": {"calories_per_day": 1800, "kidney_stone_risk": "high"}
            }"#,
        )
        .unwrap();

        let oats: Option<&NutrientProfile> = catalog.find(1);
        assert_eq!(oats.map(|o| o.name.as_str()), Some("Oats"));
        let porridge: Option<&Recipe> = catalog.find(10);
        assert_eq!(porridge.map(|r| r.ingredients.len()), Some(1));
        let missing: Option<&Menu> = catalog.find(10);
        assert!(missing.is_none());

        assert_eq!(catalog.user.calories_per_day, 1800.0);
        // Falls back to the default risk table
        assert_eq!(catalog.risk_table.limit_for("high"), Ok(50.0));
    }
}
