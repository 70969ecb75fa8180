//! Ingredient model
//!
//! Represents an ingredient ("brand") with its per-serving nutrient profile.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::nutrition::keys;
use crate::error::{NutritionError, NutritionResult};
use crate::nutrition::{to_grams, Measure};

/// A single nutrient entry in a profile
///
/// Calories are a bare number; every other nutrient is an amount with a
/// unit, written as `"300 mg"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutrientValue {
    Number(f64),
    Measure(Measure),
}

impl NutrientValue {
    /// The numeric amount, ignoring any unit
    pub fn amount(&self) -> f64 {
        match self {
            NutrientValue::Number(n) => *n,
            NutrientValue::Measure(m) => m.amount,
        }
    }

    /// Unit label for display
    pub fn display_unit(&self) -> &'static str {
        match self {
            NutrientValue::Number(_) => "kcal",
            NutrientValue::Measure(m) => m.unit.as_str(),
        }
    }
}

/// Per-serving nutrient table for one ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    /// Declared serving the nutrient amounts refer to
    pub serving_amount: Measure,
    /// Grams per milliliter; required when the ingredient is measured by volume
    #[serde(default)]
    pub density: Option<f64>,
    /// Milligrams of oxalate per gram of ingredient
    #[serde(default)]
    pub oxalate_per_gram: f64,
    #[serde(default)]
    pub nutrients: BTreeMap<String, NutrientValue>,
}

impl NutrientProfile {
    /// Calories per declared serving
    pub fn calories(&self) -> f64 {
        self.nutrients
            .get(keys::CALORIES)
            .map(NutrientValue::amount)
            .unwrap_or(0.0)
    }

    /// Total grams in one declared serving
    pub fn grams_per_serving(&self) -> NutritionResult<f64> {
        let grams = to_grams(&self.serving_amount, self.density)?;
        if grams <= 0.0 {
            return Err(NutritionError::validation(format!(
                "ingredient {} declares a serving of {} which is not a positive mass",
                self.id, self.serving_amount
            )));
        }
        Ok(grams)
    }

    /// Check the shape of the nutrient table
    ///
    /// Calories must be a bare number and every other nutrient a measure.
    pub fn validate(&self) -> NutritionResult<()> {
        for (key, value) in &self.nutrients {
            match (key.as_str() == keys::CALORIES, value) {
                (true, NutrientValue::Number(_)) | (false, NutrientValue::Measure(_)) => {}
                (true, NutrientValue::Measure(_)) => {
                    return Err(NutritionError::validation(format!(
                        "ingredient {}: calories must be a bare number",
                        self.id
                    )));
                }
                (false, NutrientValue::Number(_)) => {
                    return Err(NutritionError::validation(format!(
                        "ingredient {}: nutrient '{}' needs a unit",
                        self.id, key
                    )));
                }
            }
        }
        if !self.oxalate_per_gram.is_finite() || self.oxalate_per_gram < 0.0 {
            return Err(NutritionError::validation(format!(
                "ingredient {}: oxalate_per_gram must be a non-negative number",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::Unit;

    fn spinach_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "name": "Spinach",
            "brand": null,
            "serving_amount": "100 g",
            "oxalate_per_gram": 9.7,
            "nutrients": {
                "calories": 23,
                "sodium": "79 mg",
                "dietary_fiber": "2.2 g"
            }
        })
    }

    #[test]
    fn test_deserialize_profile() {
        let profile: NutrientProfile = serde_json::from_value(spinach_json()).unwrap();
        assert_eq!(profile.serving_amount, Measure::new(100.0, Unit::G));
        assert_eq!(profile.density, None);
        assert_eq!(profile.calories(), 23.0);
        assert_eq!(
            profile.nutrients["sodium"],
            NutrientValue::Measure(Measure::new(79.0, Unit::Mg))
        );
        assert_eq!(profile.grams_per_serving(), Ok(100.0));
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_volume_serving_needs_density() {
        let mut profile: NutrientProfile = serde_json::from_value(spinach_json()).unwrap();
        profile.serving_amount = Measure::new(8.0, Unit::Ml);
        assert_eq!(profile.grams_per_serving(), Err(NutritionError::MissingDensity));

        profile.density = Some(1.25);
        assert_eq!(profile.grams_per_serving(), Ok(10.0));
    }

    #[test]
    fn test_validate_rejects_unitless_nutrient() {
        let mut profile: NutrientProfile = serde_json::from_value(spinach_json()).unwrap();
        profile
            .nutrients
            .insert("potassium".to_string(), NutrientValue::Number(558.0));
        assert!(matches!(profile.validate(), Err(NutritionError::Validation(_))));
    }

    #[test]
    fn test_zero_serving_rejected() {
        let mut profile: NutrientProfile = serde_json::from_value(spinach_json()).unwrap();
        profile.serving_amount = Measure::new(0.0, Unit::G);
        assert!(matches!(
            profile.grams_per_serving(),
            Err(NutritionError::Validation(_))
        ));
    }
}
