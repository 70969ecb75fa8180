//! User dietary profile
//!
//! Daily energy target and kidney-stone risk, plus the per-risk oxalate limits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{NutritionError, NutritionResult};

/// The parts of a user's settings the assessment needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub calories_per_day: f64,
    /// Name of an entry in the risk table
    pub kidney_stone_risk: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            calories_per_day: 2000.0,
            kidney_stone_risk: "low".to_string(),
        }
    }
}

/// Oxalate allowance for one kidney-stone risk level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLevel {
    pub max_oxalates_per_day: f64,
}

/// Risk level name -> daily oxalate allowance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskTable(BTreeMap<String, RiskLevel>);

impl RiskTable {
    pub fn new(levels: BTreeMap<String, RiskLevel>) -> Self {
        Self(levels)
    }

    pub fn get(&self, risk: &str) -> Option<&RiskLevel> {
        self.0.get(risk)
    }

    /// Look up a risk level, failing if it is missing or unusable
    pub fn limit_for(&self, risk: &str) -> NutritionResult<f64> {
        let level = self.get(risk).ok_or_else(|| {
            NutritionError::validation(format!("no risk table entry for '{}'", risk))
        })?;
        if !level.max_oxalates_per_day.is_finite() || level.max_oxalates_per_day <= 0.0 {
            return Err(NutritionError::validation(format!(
                "risk level '{}' has a non-positive oxalate limit",
                risk
            )));
        }
        Ok(level.max_oxalates_per_day)
    }
}

impl Default for RiskTable {
    fn default() -> Self {
        let levels = [("low", 200.0), ("moderate", 100.0), ("high", 50.0)]
            .into_iter()
            .map(|(name, max)| {
                (
                    name.to_string(),
                    RiskLevel {
                        max_oxalates_per_day: max,
                    },
                )
            })
            .collect();
        Self(levels)
    }
}
