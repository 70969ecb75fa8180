//! Dietary assessment scorer
//!
//! Turns aggregated totals and oxalate mass into a DASH adherence rating,
//! an oxalate classification, recommendations and a 0-100 score.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::criteria::{CriterionRule, Tier, DASH_CRITERIA};
use super::oxalate::{
    assess_oxalate_risk, classify_oxalate_level, OxalateLevel, OxalateRisk, RiskStatus,
};
use crate::error::{NutritionError, NutritionResult};
use crate::models::{keys, NutrientTotals, RiskTable, UserProfile};

/// Level the totals were aggregated at; informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Recipe,
    Menu,
    DailyPlan,
}

impl AssessmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentKind::Recipe => "recipe",
            AssessmentKind::Menu => "menu",
            AssessmentKind::DailyPlan => "daily_plan",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            AssessmentKind::Recipe => "recipe",
            AssessmentKind::Menu => "menu",
            AssessmentKind::DailyPlan => "daily plan",
        }
    }
}

impl FromStr for AssessmentKind {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recipe" => Ok(AssessmentKind::Recipe),
            "menu" => Ok(AssessmentKind::Menu),
            "daily_plan" => Ok(AssessmentKind::DailyPlan),
            other => Err(NutritionError::validation(format!(
                "unknown assessment type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall DASH adherence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Adherence {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Adherence {
    fn score_bonus(&self) -> f64 {
        match self {
            Adherence::Excellent => 40.0,
            Adherence::Good => 30.0,
            Adherence::Fair => 20.0,
            Adherence::Poor => 10.0,
        }
    }
}

/// Weighted tallies across all criteria
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CriteriaCounts {
    pub excellent: u32,
    pub good: u32,
    pub poor: u32,
}

impl CriteriaCounts {
    fn record(&mut self, rule: &CriterionRule, tier: Tier) {
        match tier {
            Tier::Excellent => {
                self.excellent += 1;
                self.good += rule.good_weight;
            }
            Tier::Good => self.good += rule.good_weight,
            Tier::Fair => {}
            Tier::Poor => self.poor += rule.poor_weight,
        }
    }

    /// Map the tallies to an adherence rating
    pub fn adherence(&self) -> Adherence {
        if self.poor >= 4 {
            Adherence::Poor
        } else if self.poor >= 2 || self.good < 8 {
            Adherence::Fair
        } else if self.excellent >= 3 && self.good >= 12 {
            Adherence::Excellent
        } else if self.good >= 10 {
            Adherence::Good
        } else {
            Adherence::Fair
        }
    }
}

/// Breakdown row for one criterion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub value: f64,
    pub assessment: Tier,
    pub target: String,
}

/// Full assessment output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub assessment_type: AssessmentKind,
    pub adherence: Adherence,
    pub reasons: Vec<String>,
    pub oxalate_level: OxalateLevel,
    pub oxalate_risk: OxalateRisk,
    pub recommendations: Vec<String>,
    pub nutrition_score: u32,
    pub counts: CriteriaCounts,
    pub breakdown: BTreeMap<String, BreakdownEntry>,
}

/// Composite 0-100 score
pub fn nutrition_score(adherence: Adherence, counts: &CriteriaCounts, risk: RiskStatus) -> u32 {
    let oxalate_adjustment = match risk {
        RiskStatus::Safe => 10.0,
        RiskStatus::Warning => 5.0,
        RiskStatus::Danger => -10.0,
    };

    let score = 50.0
        + adherence.score_bonus()
        + (counts.good as f64 * 1.5).min(20.0)
        + (counts.excellent as f64 * 2.0).min(10.0)
        - (counts.poor as f64 * 8.0).min(25.0)
        + oxalate_adjustment;

    score.clamp(0.0, 100.0).round() as u32
}

fn validate_inputs(
    totals: &NutrientTotals,
    oxalate_mg: f64,
    user: &UserProfile,
) -> NutritionResult<()> {
    if !oxalate_mg.is_finite() || oxalate_mg < 0.0 {
        return Err(NutritionError::validation(format!(
            "oxalate mass must be a non-negative number, got {}",
            oxalate_mg
        )));
    }
    if let Some((key, _)) = totals.iter().find(|(_, v)| !v.is_finite()) {
        return Err(NutritionError::validation(format!(
            "total for '{}' is not a finite number",
            key
        )));
    }
    if !user.calories_per_day.is_finite() || user.calories_per_day <= 0.0 {
        return Err(NutritionError::validation(
            "calories_per_day must be a positive number",
        ));
    }
    Ok(())
}

/// Assess aggregated totals against DASH criteria and the user's oxalate limit
pub fn assess(
    totals: &NutrientTotals,
    oxalate_mg: f64,
    kind: AssessmentKind,
    user: &UserProfile,
    risk_table: &RiskTable,
) -> NutritionResult<AssessmentResult> {
    validate_inputs(totals, oxalate_mg, user)?;
    let max_oxalates = risk_table.limit_for(&user.kidney_stone_risk)?;

    let calories = totals.get(keys::CALORIES);
    if calories <= 0.0 {
        tracing::warn!(kind = %kind, "assessing totals with no calories");
    }

    let mut counts = CriteriaCounts::default();
    let mut reasons = Vec::with_capacity(DASH_CRITERIA.len());
    let mut advice = Vec::new();
    let mut breakdown = BTreeMap::new();

    for rule in DASH_CRITERIA.iter() {
        let outcome = rule.evaluate(totals, calories);
        counts.record(rule, outcome.tier);
        if let Some(sentence) = rule.advice_for(&outcome) {
            advice.push(sentence);
        }
        breakdown.insert(
            outcome.key.to_string(),
            BreakdownEntry {
                value: outcome.value,
                assessment: outcome.tier,
                target: outcome.target,
            },
        );
        reasons.push(outcome.reason);
    }

    let adherence = counts.adherence();
    let oxalate_level = classify_oxalate_level(oxalate_mg);
    let oxalate_risk = assess_oxalate_risk(oxalate_mg, max_oxalates);

    let mut recommendations = advice;
    match oxalate_risk.status {
        RiskStatus::Warning => recommendations.push(format!(
            "This {} uses {:.0}% of your oxalate allowance; pair high-oxalate foods with calcium-rich foods and drink plenty of water.",
            kind.noun(),
            oxalate_risk.percent
        )),
        RiskStatus::Danger => recommendations.push(format!(
            "This {} exceeds your daily oxalate limit of {} mg; swap high-oxalate ingredients such as spinach, rhubarb or almonds for low-oxalate alternatives.",
            kind.noun(),
            max_oxalates
        )),
        RiskStatus::Safe => {}
    }
    if adherence == Adherence::Excellent && oxalate_risk.status == RiskStatus::Safe {
        recommendations.push(format!(
            "Great balance: this {} follows DASH guidelines closely and keeps oxalates low.",
            kind.noun()
        ));
    }

    let nutrition_score = nutrition_score(adherence, &counts, oxalate_risk.status);

    tracing::debug!(
        kind = %kind,
        ?adherence,
        excellent = counts.excellent,
        good = counts.good,
        poor = counts.poor,
        nutrition_score,
        "assessment complete"
    );

    Ok(AssessmentResult {
        assessment_type: kind,
        adherence,
        reasons,
        oxalate_level,
        oxalate_risk,
        recommendations,
        nutrition_score,
        counts,
        breakdown,
    })
}

/// Assess loosely typed input, as received from an outer layer
///
/// Fails with a validation error when `totals` is not a mapping of numbers,
/// `oxalate_mg` is not a non-negative number or `kind` is not one of
/// `recipe`, `menu` or `daily_plan`.
pub fn assess_json(
    totals: &serde_json::Value,
    oxalate_mg: &serde_json::Value,
    kind: &str,
    user: &UserProfile,
    risk_table: &RiskTable,
) -> NutritionResult<AssessmentResult> {
    let totals = NutrientTotals::from_json(totals)?;
    let oxalate_mg = oxalate_mg
        .as_f64()
        .ok_or_else(|| NutritionError::validation("oxalate mass must be numeric"))?;
    let kind = kind.parse::<AssessmentKind>()?;
    assess(&totals, oxalate_mg, kind, user, risk_table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(risk: &str) -> UserProfile {
        UserProfile {
            calories_per_day: 2000.0,
            kidney_stone_risk: risk.to_string(),
        }
    }

    fn totals(pairs: &[(&str, f64)]) -> NutrientTotals {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    /// A 2000 kcal day where every criterion lands in "good" but not "excellent"
    fn all_good_day(sodium: f64) -> NutrientTotals {
        totals(&[
            ("calories", 2000.0),
            ("sodium", sodium),
            ("saturated_fat", 0.08 * 2000.0 / 9.0),
            ("total_fat", 0.28 * 2000.0 / 9.0),
            ("sugars", 0.07 * 2000.0 / 4.0),
            ("potassium", 4000.0),
            ("dietary_fiber", 27.0),
            ("protein", 0.15 * 2000.0 / 4.0),
            ("calcium", 1100.0),
            ("magnesium", 450.0),
            ("cholesterol", 200.0),
            ("total_carbohydrate", 0.47 * 2000.0 / 4.0),
        ])
    }

    /// A 2000 kcal day that hits every excellent band
    fn excellent_day() -> NutrientTotals {
        totals(&[
            ("calories", 2000.0),
            ("sodium", 1200.0),
            ("saturated_fat", 0.05 * 2000.0 / 9.0),
            ("total_fat", 0.25 * 2000.0 / 9.0),
            ("sugars", 0.03 * 2000.0 / 4.0),
            ("potassium", 4800.0),
            ("dietary_fiber", 32.0),
            ("protein", 0.20 * 2000.0 / 4.0),
            ("calcium", 1300.0),
            ("magnesium", 520.0),
            ("cholesterol", 100.0),
            ("total_carbohydrate", 0.55 * 2000.0 / 4.0),
        ])
    }

    #[test]
    fn test_all_good_is_good() {
        let result = assess(
            &all_good_day(2000.0),
            20.0,
            AssessmentKind::DailyPlan,
            &user("low"),
            &RiskTable::default(),
        )
        .unwrap();

        assert_eq!(result.counts.good, 20);
        assert_eq!(result.counts.excellent, 0);
        assert_eq!(result.counts.poor, 0);
        assert_eq!(result.adherence, Adherence::Good);
        assert_eq!(result.reasons.len(), 11);
        assert_eq!(result.breakdown.len(), 11);
        assert!(result.recommendations.is_empty());
        // 50 + 30 + 20 + 0 - 0 + 10, clamped
        assert_eq!(result.nutrition_score, 100);
    }

    #[test]
    fn test_sodium_change_never_raises_adherence() {
        let rate = |sodium: f64| {
            assess(
                &all_good_day(sodium),
                20.0,
                AssessmentKind::Menu,
                &user("low"),
                &RiskTable::default(),
            )
            .unwrap()
            .adherence
        };

        let excellent = rate(1000.0);
        let good = rate(2000.0);
        let fair = rate(2600.0);
        let poor = rate(3500.0);
        assert!(excellent >= good);
        assert!(good >= fair);
        assert!(fair >= poor);
        assert_eq!(poor, Adherence::Fair);
    }

    #[test]
    fn test_excellent_day() {
        let result = assess(
            &excellent_day(),
            30.0,
            AssessmentKind::DailyPlan,
            &user("low"),
            &RiskTable::default(),
        )
        .unwrap();

        assert_eq!(result.counts.excellent, 11);
        assert_eq!(result.adherence, Adherence::Excellent);
        assert_eq!(result.oxalate_risk.status, RiskStatus::Safe);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].starts_with("Great balance"));
        assert!(result.reasons.contains(&"low sodium ✓".to_string()));
        assert_eq!(result.nutrition_score, 100);
    }

    #[test]
    fn test_poor_day() {
        let day = totals(&[
            ("calories", 2000.0),
            ("sodium", 4200.0),
            ("saturated_fat", 0.16 * 2000.0 / 9.0),
            ("total_fat", 0.40 * 2000.0 / 9.0),
            ("sugars", 0.20 * 2000.0 / 4.0),
            ("potassium", 1500.0),
            ("dietary_fiber", 8.0),
            ("protein", 0.12 * 2000.0 / 4.0),
            ("calcium", 400.0),
            ("magnesium", 180.0),
            ("cholesterol", 550.0),
            ("total_carbohydrate", 0.48 * 2000.0 / 4.0),
        ]);
        let result = assess(
            &day,
            260.0,
            AssessmentKind::DailyPlan,
            &user("moderate"),
            &RiskTable::default(),
        )
        .unwrap();

        assert_eq!(result.adherence, Adherence::Poor);
        assert_eq!(result.oxalate_level, OxalateLevel::VeryHigh);
        assert_eq!(result.oxalate_risk.status, RiskStatus::Danger);
        assert_eq!(result.breakdown["sodium"].assessment, Tier::Poor);
        assert_eq!(result.breakdown["protein_percent"].assessment, Tier::Good);
        // nine unmet criteria plus the oxalate warning
        assert_eq!(result.recommendations.len(), 10);
        // 50 + 10 + min(4*1.5, 20) + 0 - 25 - 10
        assert_eq!(result.nutrition_score, 31);
    }

    #[test]
    fn test_oxalate_warning_adds_recommendation() {
        let result = assess(
            &excellent_day(),
            60.0,
            AssessmentKind::Recipe,
            &user("moderate"),
            &RiskTable::default(),
        )
        .unwrap();
        assert_eq!(result.oxalate_risk.status, RiskStatus::Warning);
        assert!((result.oxalate_risk.percent - 60.0).abs() < 1e-9);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].contains("oxalate allowance"));
    }

    #[test]
    fn test_score_formula() {
        let counts = CriteriaCounts {
            excellent: 1,
            good: 6,
            poor: 2,
        };
        // 50 + 20 + 9 + 2 - 16 + 5
        assert_eq!(nutrition_score(Adherence::Fair, &counts, RiskStatus::Warning), 70);

        let worst = CriteriaCounts {
            excellent: 0,
            good: 0,
            poor: 11,
        };
        // 50 + 10 + 0 + 0 - 25 - 10
        assert_eq!(nutrition_score(Adherence::Poor, &worst, RiskStatus::Danger), 25);
    }

    #[test]
    fn test_recipe_judged_on_fixed_thresholds() {
        let rate = |calories: f64| {
            let t = totals(&[
                ("calories", calories),
                ("sodium", 1000.0),
                ("potassium", 100.0),
            ]);
            let result = assess(
                &t,
                0.0,
                AssessmentKind::Recipe,
                &user("low"),
                &RiskTable::default(),
            )
            .unwrap();
            (
                result.breakdown["sodium"].assessment,
                result.breakdown["potassium"].assessment,
            )
        };

        assert_eq!(rate(500.0), (Tier::Excellent, Tier::Poor));
        assert_eq!(rate(0.0), (Tier::Excellent, Tier::Poor));
        assert_eq!(rate(1.0), (Tier::Excellent, Tier::Poor));
        assert_eq!(rate(2000.0), (Tier::Excellent, Tier::Poor));
    }

    #[test]
    fn test_adherence_rules() {
        let c = |excellent, good, poor| CriteriaCounts {
            excellent,
            good,
            poor,
        };
        assert_eq!(c(5, 20, 4).adherence(), Adherence::Poor);
        assert_eq!(c(5, 20, 2).adherence(), Adherence::Fair);
        assert_eq!(c(0, 7, 0).adherence(), Adherence::Fair);
        assert_eq!(c(3, 12, 1).adherence(), Adherence::Excellent);
        assert_eq!(c(2, 12, 0).adherence(), Adherence::Good);
        assert_eq!(c(0, 10, 0).adherence(), Adherence::Good);
        assert_eq!(c(0, 9, 0).adherence(), Adherence::Fair);
    }

    #[test]
    fn test_validation_failures() {
        let table = RiskTable::default();
        let t = all_good_day(2000.0);

        assert!(matches!(
            assess(&t, -1.0, AssessmentKind::Recipe, &user("low"), &table),
            Err(NutritionError::Validation(_))
        ));
        assert!(matches!(
            assess(&t, f64::NAN, AssessmentKind::Recipe, &user("low"), &table),
            Err(NutritionError::Validation(_))
        ));
        assert!(matches!(
            assess(&t, 10.0, AssessmentKind::Recipe, &user("unheard-of"), &table),
            Err(NutritionError::Validation(_))
        ));
        assert!(matches!(
            "weekly".parse::<AssessmentKind>(),
            Err(NutritionError::Validation(_))
        ));
    }

    #[test]
    fn test_assess_json_validates_shape() {
        let table = RiskTable::default();
        let u = user("low");

        let ok = assess_json(
            &serde_json::json!({"calories": 500, "sodium": 300}),
            &serde_json::json!(12.5),
            "recipe",
            &u,
            &table,
        )
        .unwrap();
        assert_eq!(ok.assessment_type, AssessmentKind::Recipe);

        let with_null = assess_json(
            &serde_json::json!({"calories": 500, "sodium": null}),
            &serde_json::json!(0),
            "menu",
            &u,
            &table,
        )
        .unwrap();
        assert_eq!(with_null.breakdown["sodium"].value, 0.0);

        assert!(matches!(
            assess_json(
                &serde_json::json!("nope"),
                &serde_json::json!(1),
                "menu",
                &u,
                &table,
            ),
            Err(NutritionError::Validation(_))
        ));
        assert!(matches!(
            assess_json(
                &serde_json::json!({}),
                &serde_json::json!("x"),
                "menu",
                &u,
                &table,
            ),
            Err(NutritionError::Validation(_))
        ));
        assert!(matches!(
            assess_json(
                &serde_json::json!({}),
                &serde_json::json!(1),
                "meal",
                &u,
                &table,
            ),
            Err(NutritionError::Validation(_))
        ));
    }
}
