//! Deal domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_COMPLETED, STATUS_IN_PROGRESS};
use crate::utils::{normalize_status, parse_amount};
use crate::{errors::ValidationError, Error, Result};

/// Pipeline or funding-round stage of a deal.
///
/// Labels the product does not know about are kept verbatim in `Other` so a
/// round trip through the backend never loses information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DealStage {
    #[default]
    Lead,
    Interest,
    DueDiligence,
    TermSheet,
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    SeriesCPlus,
    Other(String),
}

impl DealStage {
    pub fn as_str(&self) -> &str {
        match self {
            DealStage::Lead => "Lead",
            DealStage::Interest => "Interest",
            DealStage::DueDiligence => "Due Diligence",
            DealStage::TermSheet => "Term Sheet",
            DealStage::PreSeed => "Pre-Seed",
            DealStage::Seed => "Seed",
            DealStage::SeriesA => "Series A",
            DealStage::SeriesB => "Series B",
            DealStage::SeriesCPlus => "Series C+",
            DealStage::Other(label) => label.as_str(),
        }
    }

    /// Whether the stage is a funding round rather than a pipeline step.
    pub fn is_funding_round(&self) -> bool {
        matches!(
            self,
            DealStage::PreSeed
                | DealStage::Seed
                | DealStage::SeriesA
                | DealStage::SeriesB
                | DealStage::SeriesCPlus
        )
    }
}

impl From<String> for DealStage {
    fn from(label: String) -> Self {
        let key = label.trim().to_lowercase().replace(['_', '-'], " ");
        match key.as_str() {
            "lead" => DealStage::Lead,
            "interest" => DealStage::Interest,
            "due diligence" => DealStage::DueDiligence,
            "term sheet" => DealStage::TermSheet,
            "pre seed" | "preseed" => DealStage::PreSeed,
            "seed" => DealStage::Seed,
            "series a" => DealStage::SeriesA,
            "series b" => DealStage::SeriesB,
            "series c" | "series c+" => DealStage::SeriesCPlus,
            _ => DealStage::Other(label),
        }
    }
}

impl From<&str> for DealStage {
    fn from(label: &str) -> Self {
        DealStage::from(label.to_string())
    }
}

impl From<DealStage> for String {
    fn from(stage: DealStage) -> Self {
        match stage {
            DealStage::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Pipeline status labels the aggregator recognizes. Matching is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Completed,
    InProgress,
}

impl PipelineStatus {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            STATUS_COMPLETED => Some(PipelineStatus::Completed),
            STATUS_IN_PROGRESS => Some(PipelineStatus::InProgress),
            _ => None,
        }
    }
}

/// Operating figures reported by a startup.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub growth_percent: f64,
    #[serde(default)]
    pub burn_rate: f64,
    #[serde(default)]
    pub runway_months: f64,
}

/// Domain model representing one investment opportunity.
///
/// The deal score is deliberately absent: it is derived by the scoring
/// engine on demand and travels as [`crate::scoring::ScoredDeal`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    pub id: String,
    #[serde(alias = "company")]
    pub company_name: String,
    #[serde(default, alias = "founder")]
    pub founder_name: Option<String>,
    #[serde(default, alias = "industry")]
    pub sector: String,
    #[serde(default)]
    pub stage: DealStage,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub upload_date: Option<NaiveDate>,
    /// Display amount, e.g. "$5M". Numeric JSON values are kept as their
    /// decimal text.
    #[serde(
        default,
        alias = "amount",
        deserialize_with = "display_amount_format::deserialize_option_amount"
    )]
    pub ask_amount: Option<String>,
    /// Display amount, e.g. "$40M"
    #[serde(
        default,
        deserialize_with = "display_amount_format::deserialize_option_amount"
    )]
    pub valuation: Option<String>,
    #[serde(default)]
    pub financials: Option<Financials>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

impl DealRecord {
    /// Parsed ask amount in millions, falling back to the valuation when no
    /// ask is recorded. Malformed amounts count as zero.
    pub fn ask_value(&self) -> Decimal {
        match self.ask_amount.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(ask) => parse_amount(ask),
            None => self
                .valuation
                .as_deref()
                .map(parse_amount)
                .unwrap_or(Decimal::ZERO),
        }
    }

    /// Growth figure if the deal reports financials at all.
    pub fn growth_percent(&self) -> Option<f64> {
        self.financials
            .map(|f| f.growth_percent)
            .filter(|g| g.is_finite())
    }

    pub fn normalized_status(&self) -> String {
        normalize_status(&self.status)
    }

    pub fn pipeline_status(&self) -> Option<PipelineStatus> {
        PipelineStatus::from_label(&self.status)
    }

    /// Validates a record received from a listing source.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.company_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Company name cannot be empty".to_string(),
            )));
        }
        if let Some(f) = &self.financials {
            let figures = [
                ("revenue", f.revenue),
                ("growthPercent", f.growth_percent),
                ("burnRate", f.burn_rate),
                ("runwayMonths", f.runway_months),
            ];
            for (name, value) in figures {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Financial figure '{}' must be a non-negative number, got {}",
                        name, value
                    ))));
                }
            }
        }
        Ok(())
    }
}

// Amounts arrive either as display strings ("$5M") or as plain JSON numbers
mod display_amount_format {
    use serde::{Deserialize, Deserializer};
    use serde_json::Number;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AmountInput {
        String(String),
        Number(Number),
        Null,
    }

    pub fn deserialize_option_amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<AmountInput>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(AmountInput::Null) => None,
            Some(AmountInput::String(s)) => Some(s),
            Some(AmountInput::Number(n)) => Some(n.to_string()),
        })
    }
}
