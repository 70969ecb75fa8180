//! Oxalate classification
//!
//! Absolute oxalate level bands and the personalized risk against a user's
//! daily allowance.

use serde::Serialize;

/// Absolute oxalate level of a total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OxalateLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl OxalateLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OxalateLevel::Low => "Low",
            OxalateLevel::Moderate => "Moderate",
            OxalateLevel::High => "High",
            OxalateLevel::VeryHigh => "Very High",
        }
    }
}

/// Classify an oxalate mass in milligrams; each band includes its lower bound
pub fn classify_oxalate_level(oxalate_mg: f64) -> OxalateLevel {
    if oxalate_mg < 50.0 {
        OxalateLevel::Low
    } else if oxalate_mg < 100.0 {
        OxalateLevel::Moderate
    } else if oxalate_mg < 200.0 {
        OxalateLevel::High
    } else {
        OxalateLevel::VeryHigh
    }
}

/// Personalized oxalate risk status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    Safe,
    Warning,
    Danger,
}

/// Oxalate mass relative to the user's daily allowance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OxalateRisk {
    pub status: RiskStatus,
    pub percent: f64,
    pub message: String,
}

/// Compare an oxalate mass to a daily limit
///
/// Below 50% of the limit is safe, below 100% a warning, anything else danger.
pub fn assess_oxalate_risk(oxalate_mg: f64, max_per_day: f64) -> OxalateRisk {
    let percent = oxalate_mg / max_per_day * 100.0;

    let (status, message) = if percent < 50.0 {
        (
            RiskStatus::Safe,
            format!(
                "Oxalates are well within your daily limit of {} mg",
                max_per_day
            ),
        )
    } else if percent < 100.0 {
        (
            RiskStatus::Warning,
            format!(
                "Approaching your daily oxalate limit of {} mg ({:.0}% used)",
                max_per_day, percent
            ),
        )
    } else {
        (
            RiskStatus::Danger,
            format!(
                "{:.1} mg of oxalates is {:.0}% over your daily limit of {} mg",
                oxalate_mg,
                percent - 100.0,
                max_per_day
            ),
        )
    };

    OxalateRisk {
        status,
        percent,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        let cases = [
            (0.0, OxalateLevel::Low),
            (49.9, OxalateLevel::Low),
            (50.0, OxalateLevel::Moderate),
            (99.9, OxalateLevel::Moderate),
            (100.0, OxalateLevel::High),
            (199.9, OxalateLevel::High),
            (200.0, OxalateLevel::VeryHigh),
            (1250.0, OxalateLevel::VeryHigh),
        ];
        for (mg, expected) in cases {
            assert_eq!(classify_oxalate_level(mg), expected, "{} mg", mg);
        }
    }

    #[test]
    fn test_level_serializes_with_space() {
        assert_eq!(
            serde_json::to_string(&OxalateLevel::VeryHigh).unwrap(),
            "\"Very High\""
        );
        assert_eq!(OxalateLevel::VeryHigh.as_str(), "Very High");
    }

    #[test]
    fn test_risk_percent() {
        let risk = assess_oxalate_risk(100.0, 200.0);
        assert_eq!(risk.percent, 50.0);
        assert_eq!(risk.status, RiskStatus::Warning);
        assert!(risk.message.contains("200 mg"));
    }

    #[test]
    fn test_risk_transitions() {
        assert_eq!(assess_oxalate_risk(99.0, 200.0).status, RiskStatus::Safe);
        assert_eq!(assess_oxalate_risk(100.0, 200.0).status, RiskStatus::Warning);
        assert_eq!(assess_oxalate_risk(199.0, 200.0).status, RiskStatus::Warning);
        assert_eq!(assess_oxalate_risk(200.0, 200.0).status, RiskStatus::Danger);
    }

    #[test]
    fn test_danger_message_cites_excess() {
        let risk = assess_oxalate_risk(75.0, 50.0);
        assert_eq!(risk.status, RiskStatus::Danger);
        assert_eq!(risk.percent, 150.0);
        assert_eq!(
            risk.message,
            "75.0 mg of oxalates is 50% over your daily limit of 50 mg"
        );
    }
}
