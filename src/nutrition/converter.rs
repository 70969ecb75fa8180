//! Measure parsing and conversion
//!
//! Parses `"<number> <unit>"` strings and normalizes them to grams.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::units::{Unit, UnitCategory};
use crate::error::{NutritionError, NutritionResult};

/// An amount paired with a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Measure {
    pub amount: f64,
    pub unit: Unit,
}

impl Measure {
    pub fn new(amount: f64, unit: Unit) -> Self {
        Self { amount, unit }
    }

    /// Convert this measure to grams, using `density` (g/ml) for volumes
    pub fn to_grams(&self, density: Option<f64>) -> NutritionResult<f64> {
        to_grams(self, density)
    }
}

/// Parse a measure string
///
/// Examples:
/// - "100 g" -> Measure { amount: 100.0, unit: G }
/// - "300 mg" -> Measure { amount: 300.0, unit: Mg }
/// - "8 ml" -> Measure { amount: 8.0, unit: Ml }
pub fn parse_measure(text: &str) -> NutritionResult<Measure> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [amount_token, unit_token] = tokens.as_slice() else {
        return Err(NutritionError::Parse(text.to_string()));
    };

    let amount = amount_token
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| NutritionError::Parse(text.to_string()))?;
    let unit = unit_token.parse::<Unit>()?;

    Ok(Measure { amount, unit })
}

/// Convert a measure to grams
///
/// Mass units convert directly. Volume (`ml`) is multiplied by the density
/// in grams per milliliter, which must be present and non-zero.
pub fn to_grams(measure: &Measure, density: Option<f64>) -> NutritionResult<f64> {
    match measure.unit.category() {
        UnitCategory::Weight => {
            let per_gram = measure.unit.units_per_gram().unwrap_or(1.0);
            Ok(measure.amount / per_gram)
        }
        UnitCategory::Volume => match density {
            None => Err(NutritionError::MissingDensity),
            Some(d) if d == 0.0 => Err(NutritionError::MissingDensity),
            Some(d) if !d.is_finite() || d < 0.0 => Err(NutritionError::validation(format!(
                "density must be a positive number, got {}",
                d
            ))),
            Some(d) => Ok(measure.amount * d),
        },
    }
}

/// Convert a raw amount and unit token pair to grams
pub fn amount_to_grams(amount: f64, unit: Unit, density: Option<f64>) -> NutritionResult<f64> {
    to_grams(&Measure::new(amount, unit), density)
}

impl FromStr for Measure {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_measure(s)
    }
}

impl TryFrom<String> for Measure {
    type Error = NutritionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_measure(&value)
    }
}

impl From<Measure> for String {
    fn from(measure: Measure) -> String {
        measure.to_string()
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}
