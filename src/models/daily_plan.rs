//! Daily plan model
//!
//! A day's worth of menus, each tagged with the meal it is eaten at.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Meal type label, used for display grouping only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum MealType {
    #[serde(alias = "breakfast")]
    Breakfast,
    #[serde(alias = "lunch")]
    Lunch,
    #[serde(alias = "dinner")]
    Dinner,
    #[serde(alias = "snack")]
    Snack,
    #[serde(alias = "other")]
    #[default]
    Other,
}

impl MealType {
    /// All meal types in display order
    pub const ALL: [MealType; 5] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
        MealType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
            MealType::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            "snack" => MealType::Snack,
            _ => MealType::Other,
        }
    }
}

/// A daily plan referencing menus in declared order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub id: i64,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub menus: Vec<PlanMenu>,
    pub notes: Option<String>,
}

/// A menu eaten as part of a daily plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMenu {
    pub menu_id: i64,
    #[serde(default)]
    pub meal_type: MealType,
}

impl PlanMenu {
    pub fn new(menu_id: i64, meal_type: MealType) -> Self {
        Self { menu_id, meal_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_labels() {
        assert_eq!(MealType::from_str("Breakfast"), MealType::Breakfast);
        assert_eq!(MealType::from_str("snack"), MealType::Snack);
        assert_eq!(MealType::from_str("brunch"), MealType::Other);
        assert_eq!(MealType::Dinner.as_str(), "Dinner");
    }

    #[test]
    fn test_deserialize_plan() {
        let plan: DailyPlan = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Monday",
            "date": "2026-10-19",
            "menus": [
                {"menu_id": 3, "meal_type": "Breakfast"},
                {"menu_id": 4, "meal_type": "dinner"},
                {"menu_id": 5}
            ]
        }))
        .unwrap();

        assert_eq!(plan.date, NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(plan.menus[1].meal_type, MealType::Dinner);
        assert_eq!(plan.menus[2].meal_type, MealType::Other);
        assert_eq!(plan.notes, None);
    }
}
