//! Unit types and conversion constants
//!
//! Provides the recognized measurement units and their factors to grams.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NutritionError;

/// Milligrams per gram
pub const MG_PER_G: f64 = 1_000.0;
/// Micrograms per gram
pub const MCG_PER_G: f64 = 1_000_000.0;

/// A recognized measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    /// Grams
    G,
    /// Milligrams
    Mg,
    /// Micrograms
    Mcg,
    /// Milliliters, converted to mass through a density
    Ml,
}

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    /// Mass units (g, mg, mcg)
    Weight,
    /// Volume units (ml)
    Volume,
}

impl Unit {
    /// Get the unit token as written in measure strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Mg => "mg",
            Unit::Mcg => "mcg",
            Unit::Ml => "ml",
        }
    }

    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::G | Unit::Mg | Unit::Mcg => UnitCategory::Weight,
            Unit::Ml => UnitCategory::Volume,
        }
    }

    /// How many of this unit make up one gram; None for volume
    pub fn units_per_gram(&self) -> Option<f64> {
        match self {
            Unit::G => Some(1.0),
            Unit::Mg => Some(MG_PER_G),
            Unit::Mcg => Some(MCG_PER_G),
            Unit::Ml => None,
        }
    }
}

impl FromStr for Unit {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g" => Ok(Unit::G),
            "mg" => Ok(Unit::Mg),
            "mcg" => Ok(Unit::Mcg),
            "ml" => Ok(Unit::Ml),
            other => Err(NutritionError::UnsupportedUnit(other.to_string())),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = NutritionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> String {
        unit.as_str().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_units() {
        assert_eq!("g".parse::<Unit>(), Ok(Unit::G));
        assert_eq!("mg".parse::<Unit>(), Ok(Unit::Mg));
        assert_eq!("mcg".parse::<Unit>(), Ok(Unit::Mcg));
        assert_eq!("ml".parse::<Unit>(), Ok(Unit::Ml));
    }

    #[test]
    fn test_parse_unknown_unit() {
        assert_eq!(
            "tbsp".parse::<Unit>(),
            Err(NutritionError::UnsupportedUnit("tbsp".to_string()))
        );
        // Tokens are exact, no case folding
        assert!("G".parse::<Unit>().is_err());
    }

    #[test]
    fn test_categorize_units() {
        assert_eq!(Unit::G.category(), UnitCategory::Weight);
        assert_eq!(Unit::Mcg.category(), UnitCategory::Weight);
        assert_eq!(Unit::Ml.category(), UnitCategory::Volume);
    }

    #[test]
    fn test_units_per_gram() {
        assert_eq!(Unit::G.units_per_gram(), Some(1.0));
        assert_eq!(Unit::Mg.units_per_gram(), Some(MG_PER_G));
        assert_eq!(Unit::Mcg.units_per_gram(), Some(MCG_PER_G));
        assert_eq!(Unit::Ml.units_per_gram(), None);
    }
}
