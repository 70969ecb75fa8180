//! Dietary assessment module
//!
//! DASH adherence scoring and oxalate risk classification over any level's
//! nutrition totals.

pub mod criteria;
pub mod oxalate;
pub mod scorer;

pub use criteria::{Band, CriterionOutcome, CriterionRule, Metric, Tier, DASH_CRITERIA};
pub use oxalate::{
    assess_oxalate_risk, classify_oxalate_level, OxalateLevel, OxalateRisk, RiskStatus,
};
pub use scorer::{
    assess, assess_json, nutrition_score, Adherence, AssessmentKind, AssessmentResult,
    BreakdownEntry, CriteriaCounts,
};
