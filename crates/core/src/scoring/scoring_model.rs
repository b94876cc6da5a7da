//! Scoring policy and score models.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::deals::DealRecord;
use crate::{Error, Result};

/// Weights of the four sub-scores. They must sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringWeights {
    pub team: Decimal,
    pub market: Decimal,
    pub traction: Decimal,
    pub risk: Decimal,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            team: dec!(0.30),
            market: dec!(0.25),
            traction: dec!(0.25),
            risk: dec!(0.20),
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> Decimal {
        self.team + self.market + self.traction + self.risk
    }
}

/// Keyword-driven sub-score: `base + per_match * matching highlights`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub base: Decimal,
    pub per_match: Decimal,
}

/// Traction sub-score: `growth / growth_divisor + revenue / revenue_divisor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TractionRule {
    pub growth_divisor: Decimal,
    pub revenue_divisor: Decimal,
}

impl Default for TractionRule {
    fn default() -> Self {
        Self {
            growth_divisor: dec!(2),
            revenue_divisor: dec!(100000),
        }
    }
}

/// Risk sub-score: `base - penalty_per_factor * risk factors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskRule {
    pub base: Decimal,
    pub penalty_per_factor: Decimal,
}

impl Default for RiskRule {
    fn default() -> Self {
        Self {
            base: dec!(100),
            penalty_per_factor: dec!(20),
        }
    }
}

/// Constants of the deal score formula.
///
/// The defaults are the product's demo values; deployments may load their
/// own policy with [`ScoringPolicy::from_json`]. Sections missing from the
/// JSON keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringPolicy {
    pub weights: ScoringWeights,
    pub team: KeywordRule,
    pub market: KeywordRule,
    pub traction: TractionRule,
    pub risk: RiskRule,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            team: KeywordRule {
                keywords: vec!["team".into(), "experienced".into(), "proven".into()],
                base: dec!(50),
                per_match: dec!(25),
            },
            market: KeywordRule {
                keywords: vec!["market".into(), "large".into(), "growing".into()],
                base: dec!(40),
                per_match: dec!(30),
            },
            traction: TractionRule::default(),
            risk: RiskRule::default(),
        }
    }
}

/// Tolerance for the weight sum, so weights written as JSON floats validate.
const WEIGHT_SUM_TOLERANCE: Decimal = dec!(0.0001);

impl ScoringPolicy {
    /// Parses and validates a policy from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let policy: ScoringPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Checks the invariants the scoring engine relies on.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        if [w.team, w.market, w.traction, w.risk]
            .iter()
            .any(|weight| *weight < Decimal::ZERO)
        {
            return Err(Error::InvalidConfigValue(
                "scoring weights cannot be negative".to_string(),
            ));
        }
        if (w.total() - Decimal::ONE).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::InvalidConfigValue(format!(
                "scoring weights must sum to 1.0, got {}",
                w.total()
            )));
        }
        if self.traction.growth_divisor <= Decimal::ZERO
            || self.traction.revenue_divisor <= Decimal::ZERO
        {
            return Err(Error::InvalidConfigValue(
                "traction divisors must be positive".to_string(),
            ));
        }
        for (name, rule) in [("team", &self.team), ("market", &self.market)] {
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(Error::InvalidConfigValue(format!(
                    "{} keywords cannot be blank",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Sub-scores behind a deal score, each within 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub team: Decimal,
    pub market: Decimal,
    pub traction: Decimal,
    pub risk: Decimal,
    pub total: u8,
}

/// A deal together with its derived score, as served to the pipeline views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDeal {
    #[serde(flatten)]
    pub deal: DealRecord,
    pub deal_score: u8,
    pub score_breakdown: ScoreBreakdown,
}
