//! Shared nutrition totals
//!
//! Used across recipes, menus, and daily plans.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{NutritionError, NutritionResult};

/// Well-known nutrient keys
pub mod keys {
    pub const CALORIES: &str = "calories";
    pub const PROTEIN: &str = "protein";
    pub const TOTAL_FAT: &str = "total_fat";
    pub const SATURATED_FAT: &str = "saturated_fat";
    pub const CHOLESTEROL: &str = "cholesterol";
    pub const SODIUM: &str = "sodium";
    pub const TOTAL_CARBOHYDRATE: &str = "total_carbohydrate";
    pub const DIETARY_FIBER: &str = "dietary_fiber";
    pub const SUGARS: &str = "sugars";
    pub const ADDED_SUGARS: &str = "added_sugars";
    pub const POTASSIUM: &str = "potassium";
    pub const CALCIUM: &str = "calcium";
    pub const MAGNESIUM: &str = "magnesium";
}

/// Per-nutrient accumulated amounts
///
/// Open-ended: any nutrient key may appear. Keys iterate in sorted order so
/// summation and serialization are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientTotals(BTreeMap<String, f64>);

impl NutrientTotals {
    /// Create empty totals
    pub fn zero() -> Self {
        Self::default()
    }

    /// Amount for a nutrient; missing keys count as zero
    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Add an amount to a nutrient, initializing it at zero
    pub fn add_amount(&mut self, key: &str, amount: f64) {
        *self.0.entry(key.to_string()).or_insert(0.0) += amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scale every nutrient by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v * multiplier))
                .collect(),
        )
    }

    /// Add other totals to these, key by key
    pub fn add(&self, other: &NutrientTotals) -> Self {
        let mut out = self.clone();
        for (key, amount) in other.iter() {
            out.add_amount(key, amount);
        }
        out
    }

    /// Build totals from an untyped JSON value
    ///
    /// The value must be an object whose entries are numbers; `null` entries
    /// count as missing.
    pub fn from_json(value: &serde_json::Value) -> NutritionResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| NutritionError::validation("totals must be a mapping"))?;

        let mut totals = Self::zero();
        for (key, v) in map {
            if v.is_null() {
                continue;
            }
            let amount = v.as_f64().ok_or_else(|| {
                NutritionError::validation(format!("total for '{}' is not numeric", key))
            })?;
            totals.add_amount(key, amount);
        }
        Ok(totals)
    }
}

impl FromIterator<(String, f64)> for NutrientTotals {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut totals = Self::zero();
        for (key, amount) in iter {
            totals.add_amount(&key, amount);
        }
        totals
    }
}

/// Nutrient totals plus the separately tracked oxalate mass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub totals: NutrientTotals,
    /// Milligrams of oxalate
    pub oxalate_mg: f64,
}

impl NutritionSummary {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale totals and oxalate mass by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            totals: self.totals.scale(multiplier),
            oxalate_mg: self.oxalate_mg * multiplier,
        }
    }

    pub fn add(&self, other: &NutritionSummary) -> Self {
        Self {
            totals: self.totals.add(&other.totals),
            oxalate_mg: self.oxalate_mg + other.oxalate_mg,
        }
    }
}

impl std::ops::Add for NutritionSummary {
    type Output = NutritionSummary;

    fn add(self, other: NutritionSummary) -> NutritionSummary {
        NutritionSummary::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for NutritionSummary {
    type Output = NutritionSummary;

    fn mul(self, multiplier: f64) -> NutritionSummary {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for NutritionSummary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionSummary::zero(), |acc, n| acc + n)
    }
}
