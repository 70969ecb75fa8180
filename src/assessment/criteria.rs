//! DASH criteria table
//!
//! Each nutrient criterion is a row of thresholds and weights evaluated by
//! the same code path, so rules can be audited and tested one at a time.

use serde::Serialize;

use crate::models::{keys, NutrientTotals};

/// How a criterion reads its value from the totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Absolute amount of the first key present, checked against the fixed
    /// daily thresholds
    Amount {
        keys: &'static [&'static str],
        unit: &'static str,
    },
    /// Share of calories coming from the first key present, in percent
    PercentOfCalories {
        keys: &'static [&'static str],
        kcal_per_gram: f64,
    },
}

/// Threshold layout of a criterion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    /// Lower is better: excellent below, good up to, poor above
    AtMost {
        excellent: f64,
        good: f64,
        poor: f64,
    },
    /// Higher is better: excellent from, good from, poor below
    AtLeast {
        excellent: f64,
        good: f64,
        poor: f64,
    },
    /// A target range: excellent and good ranges are inclusive, poor is
    /// anything outside the outer range
    Within {
        excellent: (f64, f64),
        good: (f64, f64),
        poor: (f64, f64),
    },
}

/// Outcome of one criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Poor => "poor",
            Tier::Fair => "fair",
            Tier::Good => "good",
            Tier::Excellent => "excellent",
        }
    }

    /// Whether this outcome meets the guideline
    pub fn is_met(&self) -> bool {
        matches!(self, Tier::Good | Tier::Excellent)
    }
}

/// One row of the criteria table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionRule {
    /// Breakdown key
    pub key: &'static str,
    /// Short name used in reasons
    pub label: &'static str,
    pub metric: Metric,
    pub band: Band,
    /// Added to the good counter when the criterion is good or excellent
    pub good_weight: u32,
    /// Added to the poor counter when the criterion is poor
    pub poor_weight: u32,
    /// Guideline the thresholds come from
    pub source: &'static str,
    /// Recommendation sentence; `{target}` is replaced with the target
    pub advice: &'static str,
}

/// Evaluated criterion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionOutcome {
    pub key: &'static str,
    pub value: f64,
    pub tier: Tier,
    pub target: String,
    pub reason: String,
}

/// The eleven DASH criteria, in evaluation order
pub static DASH_CRITERIA: [CriterionRule; 11] = [
    CriterionRule {
        key: "sodium",
        label: "sodium",
        metric: Metric::Amount {
            keys: &[keys::SODIUM],
            unit: "mg",
        },
        band: Band::AtMost {
            excellent: 1500.0,
            good: 2300.0,
            poor: 3000.0,
        },
        good_weight: 2,
        poor_weight: 2,
        source: "DASH",
        advice: "Cut sodium to {target} by choosing fresh over processed foods and seasoning with herbs instead of salt.",
    },
    CriterionRule {
        key: "saturated_fat_percent",
        label: "saturated fat",
        metric: Metric::PercentOfCalories {
            keys: &[keys::SATURATED_FAT],
            kcal_per_gram: 9.0,
        },
        band: Band::AtMost {
            excellent: 6.0,
            good: 10.0,
            poor: 13.0,
        },
        good_weight: 2,
        poor_weight: 2,
        source: "DASH",
        advice: "Keep saturated fat to {target} of calories by swapping fatty meats and butter for lean protein and plant oils.",
    },
    CriterionRule {
        key: "total_fat_percent",
        label: "total fat",
        metric: Metric::PercentOfCalories {
            keys: &[keys::TOTAL_FAT],
            kcal_per_gram: 9.0,
        },
        band: Band::AtMost {
            excellent: 27.0,
            good: 30.0,
            poor: 35.0,
        },
        good_weight: 2,
        poor_weight: 1,
        source: "DASH",
        advice: "Bring total fat to {target} of calories with more vegetables and whole grains.",
    },
    CriterionRule {
        key: "added_sugar_percent",
        label: "sugar",
        metric: Metric::PercentOfCalories {
            keys: &[keys::ADDED_SUGARS, keys::SUGARS],
            kcal_per_gram: 4.0,
        },
        band: Band::AtMost {
            excellent: 5.0,
            good: 10.0,
            poor: 10.0,
        },
        good_weight: 2,
        poor_weight: 2,
        source: "WHO",
        advice: "Limit added sugar to {target} of calories by replacing sweets and sugary drinks with fruit.",
    },
    CriterionRule {
        key: "potassium",
        label: "potassium",
        metric: Metric::Amount {
            keys: &[keys::POTASSIUM],
            unit: "mg",
        },
        band: Band::AtLeast {
            excellent: 4700.0,
            good: 3500.0,
            poor: 2000.0,
        },
        good_weight: 2,
        poor_weight: 1,
        source: "DASH",
        advice: "Raise potassium to {target} with beans, potatoes, bananas and leafy greens.",
    },
    CriterionRule {
        key: "fiber",
        label: "fiber",
        metric: Metric::Amount {
            keys: &[keys::DIETARY_FIBER],
            unit: "g",
        },
        band: Band::AtLeast {
            excellent: 30.0,
            good: 25.0,
            poor: 15.0,
        },
        good_weight: 2,
        poor_weight: 1,
        source: "DASH",
        advice: "Increase fiber to {target} with whole grains, legumes and vegetables.",
    },
    CriterionRule {
        key: "protein_percent",
        label: "protein",
        metric: Metric::PercentOfCalories {
            keys: &[keys::PROTEIN],
            kcal_per_gram: 4.0,
        },
        band: Band::Within {
            excellent: (18.0, 25.0),
            good: (10.0, 35.0),
            poor: (10.0, 35.0),
        },
        good_weight: 2,
        poor_weight: 1,
        source: "DASH",
        advice: "Adjust protein to {target} of calories using fish, poultry, legumes and low-fat dairy.",
    },
    CriterionRule {
        key: "calcium",
        label: "calcium",
        metric: Metric::Amount {
            keys: &[keys::CALCIUM],
            unit: "mg",
        },
        band: Band::AtLeast {
            excellent: 1250.0,
            good: 1000.0,
            poor: 600.0,
        },
        good_weight: 1,
        poor_weight: 1,
        source: "DASH",
        advice: "Add low-fat dairy or fortified alternatives to reach {target} of calcium; calcium also binds dietary oxalate.",
    },
    CriterionRule {
        key: "magnesium",
        label: "magnesium",
        metric: Metric::Amount {
            keys: &[keys::MAGNESIUM],
            unit: "mg",
        },
        band: Band::AtLeast {
            excellent: 500.0,
            good: 400.0,
            poor: 250.0,
        },
        good_weight: 1,
        poor_weight: 1,
        source: "DASH",
        advice: "Reach {target} of magnesium with whole grains, seeds and legumes.",
    },
    CriterionRule {
        key: "cholesterol",
        label: "cholesterol",
        metric: Metric::Amount {
            keys: &[keys::CHOLESTEROL],
            unit: "mg",
        },
        band: Band::AtMost {
            excellent: 150.0,
            good: 300.0,
            poor: 400.0,
        },
        good_weight: 2,
        poor_weight: 1,
        source: "DASH",
        advice: "Keep cholesterol to {target} by limiting egg yolks, organ meats and full-fat dairy.",
    },
    CriterionRule {
        key: "carbohydrate_percent",
        label: "carbohydrate",
        metric: Metric::PercentOfCalories {
            keys: &[keys::TOTAL_CARBOHYDRATE],
            kcal_per_gram: 4.0,
        },
        band: Band::Within {
            excellent: (50.0, 60.0),
            good: (45.0, 65.0),
            poor: (40.0, 70.0),
        },
        good_weight: 2,
        poor_weight: 1,
        source: "DASH",
        advice: "Aim for {target} of calories from carbohydrate, mostly from whole grains, fruit and vegetables.",
    },
];

fn first_present(totals: &NutrientTotals, keys: &[&str]) -> f64 {
    keys.iter()
        .find(|k| totals.contains(k))
        .map(|k| totals.get(k))
        .unwrap_or(0.0)
}

fn fmt_amount(value: f64, unit: &str) -> String {
    if unit == "%" {
        format!("{:.1}%", value)
    } else {
        format!("{:.0} {}", value, unit)
    }
}

impl CriterionRule {
    fn unit(&self) -> &'static str {
        match self.metric {
            Metric::Amount { unit, .. } => unit,
            Metric::PercentOfCalories { .. } => "%",
        }
    }

    /// Read this criterion's value from the totals
    pub fn value(&self, totals: &NutrientTotals, calories: f64) -> f64 {
        match self.metric {
            Metric::Amount { keys, .. } => first_present(totals, keys),
            Metric::PercentOfCalories {
                keys,
                kcal_per_gram,
            } => {
                if calories > 0.0 {
                    first_present(totals, keys) * kcal_per_gram / calories * 100.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Classify a value against this rule's thresholds
    pub fn tier(&self, value: f64) -> Tier {
        match self.band {
            Band::AtMost {
                excellent,
                good,
                poor,
            } => {
                if value < excellent {
                    Tier::Excellent
                } else if value <= good {
                    Tier::Good
                } else if value > poor {
                    Tier::Poor
                } else {
                    Tier::Fair
                }
            }
            Band::AtLeast {
                excellent,
                good,
                poor,
            } => {
                if value >= excellent {
                    Tier::Excellent
                } else if value >= good {
                    Tier::Good
                } else if value < poor {
                    Tier::Poor
                } else {
                    Tier::Fair
                }
            }
            Band::Within {
                excellent,
                good,
                poor,
            } => {
                let inside = |(lo, hi): (f64, f64)| value >= lo && value <= hi;
                if inside(excellent) {
                    Tier::Excellent
                } else if inside(good) {
                    Tier::Good
                } else if !inside(poor) {
                    Tier::Poor
                } else {
                    Tier::Fair
                }
            }
        }
    }

    /// Human-readable target, e.g. "≤ 2300 mg" or "45–65%"
    pub fn target(&self) -> String {
        let unit = self.unit();
        match self.band {
            Band::AtMost { good, .. } => format!("≤ {}", fmt_amount(good, unit)),
            Band::AtLeast { good, .. } => format!("≥ {}", fmt_amount(good, unit)),
            Band::Within { good: (lo, hi), .. } => {
                if unit == "%" {
                    format!("{:.0}–{:.0}%", lo, hi)
                } else {
                    format!(
                        "{}–{}",
                        fmt_amount(lo, unit),
                        fmt_amount(hi, unit)
                    )
                }
            }
        }
    }

    fn reason(&self, value: f64, tier: Tier) -> String {
        let unit = self.unit();
        let shown = fmt_amount(value, unit);
        match (self.band, tier) {
            (Band::AtMost { .. }, Tier::Excellent) => format!("low {} ✓", self.label),
            (Band::AtMost { .. }, Tier::Good) => format!("moderate {} ✓", self.label),
            (Band::AtMost { good, .. }, Tier::Fair) => format!(
                "elevated {} ({} > {})",
                self.label,
                shown,
                fmt_amount(good, unit)
            ),
            (Band::AtMost { poor, .. }, Tier::Poor) => format!(
                "high {} ({} > {} {}) ⚠",
                self.label,
                shown,
                fmt_amount(poor, unit),
                self.source
            ),
            (Band::AtLeast { .. }, Tier::Excellent) => format!("high {} ✓", self.label),
            (Band::AtLeast { .. }, Tier::Good) => format!("adequate {} ✓", self.label),
            (Band::AtLeast { good, .. }, Tier::Fair) => format!(
                "below-target {} ({} < {})",
                self.label,
                shown,
                fmt_amount(good, unit)
            ),
            (Band::AtLeast { poor, .. }, Tier::Poor) => format!(
                "low {} ({} < {} {}) ⚠",
                self.label,
                shown,
                fmt_amount(poor, unit),
                self.source
            ),
            (Band::Within { .. }, Tier::Excellent) => format!("optimal {} ✓", self.label),
            (Band::Within { .. }, Tier::Good) => format!("acceptable {} ✓", self.label),
            (Band::Within { .. }, Tier::Fair) => format!(
                "{} outside ideal range ({}, target {})",
                self.label,
                shown,
                self.target()
            ),
            (Band::Within { good: (lo, _), .. }, Tier::Poor) => format!(
                "{} {} ({}, {} range {}) ⚠",
                if value < lo { "too little" } else { "too much" },
                self.label,
                shown,
                self.source,
                self.target()
            ),
        }
    }

    /// Evaluate this criterion against totals
    pub fn evaluate(&self, totals: &NutrientTotals, calories: f64) -> CriterionOutcome {
        let value = self.value(totals, calories);
        let tier = self.tier(value);

        CriterionOutcome {
            key: self.key,
            value,
            tier,
            target: self.target(),
            reason: self.reason(value, tier),
        }
    }

    /// Recommendation sentence for an unmet criterion
    pub fn advice_for(&self, outcome: &CriterionOutcome) -> Option<String> {
        if outcome.tier.is_met() {
            None
        } else {
            Some(self.advice.replace("{target}", &outcome.target))
        }
    }
}
