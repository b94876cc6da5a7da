//! Analysis framework models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_SCORE;
use crate::{errors::ValidationError, Error, Result};

/// The six fixed analysis frameworks applied to a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkKey {
    FounderSignal,
    MarketOpportunity,
    ProductTraction,
    CompetitiveMoat,
    FinancialHealth,
    DueDiligence,
}

impl FrameworkKey {
    pub const ALL: [FrameworkKey; 6] = [
        FrameworkKey::FounderSignal,
        FrameworkKey::MarketOpportunity,
        FrameworkKey::ProductTraction,
        FrameworkKey::CompetitiveMoat,
        FrameworkKey::FinancialHealth,
        FrameworkKey::DueDiligence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkKey::FounderSignal => "founder_signal",
            FrameworkKey::MarketOpportunity => "market_opportunity",
            FrameworkKey::ProductTraction => "product_traction",
            FrameworkKey::CompetitiveMoat => "competitive_moat",
            FrameworkKey::FinancialHealth => "financial_health",
            FrameworkKey::DueDiligence => "due_diligence",
        }
    }
}

impl fmt::Display for FrameworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameworkKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FrameworkKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown framework '{}'",
                    s
                )))
            })
    }
}

/// Display metadata of one framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkDescriptor {
    pub order: u32,
    pub name: String,
    pub icon: String,
    pub description: String,
}

impl FrameworkDescriptor {
    fn new(order: u32, name: &str, icon: &str, description: &str) -> Self {
        Self {
            order,
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
        }
    }
}

/// Framework configuration map, keyed by framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkConfig(BTreeMap<FrameworkKey, FrameworkDescriptor>);

impl Default for FrameworkConfig {
    fn default() -> Self {
        let entries = [
            (
                FrameworkKey::FounderSignal,
                FrameworkDescriptor::new(1, "Founder Signal", "users", "Founder background, team completeness and execution history"),
            ),
            (
                FrameworkKey::MarketOpportunity,
                FrameworkDescriptor::new(2, "Market Opportunity", "globe", "Market size, growth and timing"),
            ),
            (
                FrameworkKey::ProductTraction,
                FrameworkDescriptor::new(3, "Product Traction", "trending-up", "Revenue, growth rate and customer pull"),
            ),
            (
                FrameworkKey::CompetitiveMoat,
                FrameworkDescriptor::new(4, "Competitive Moat", "shield", "Defensibility against incumbents and new entrants"),
            ),
            (
                FrameworkKey::FinancialHealth,
                FrameworkDescriptor::new(5, "Financial Health", "dollar-sign", "Burn, runway and capital efficiency"),
            ),
            (
                FrameworkKey::DueDiligence,
                FrameworkDescriptor::new(6, "Due Diligence", "clipboard-check", "Legal, reference and technical checks"),
            ),
        ];
        Self(entries.into_iter().collect())
    }
}

impl FrameworkConfig {
    /// Parses a configuration map. Frameworks missing from the JSON keep
    /// their built-in metadata; unknown keys are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: BTreeMap<FrameworkKey, FrameworkDescriptor> = serde_json::from_str(json)?;
        let mut config = Self::default();
        config.0.extend(overrides);
        Ok(config)
    }

    /// Canonical framework sequence: ascending `order`, ties by key.
    pub fn ordered_keys(&self) -> Vec<FrameworkKey> {
        let mut entries: Vec<(&FrameworkKey, &FrameworkDescriptor)> = self.0.iter().collect();
        entries.sort_by_key(|(key, descriptor)| (descriptor.order, **key));
        entries.into_iter().map(|(key, _)| *key).collect()
    }

    pub fn descriptor(&self, key: FrameworkKey) -> Option<&FrameworkDescriptor> {
        self.0.get(&key)
    }
}

/// Where a framework stands for a given deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkState {
    pub status: FrameworkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

/// Per-deal framework progress. Frameworks without an entry are pending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkProgress {
    pub deal_id: String,
    pub frameworks: BTreeMap<FrameworkKey, FrameworkState>,
}

impl FrameworkProgress {
    pub fn new(deal_id: &str) -> Self {
        Self {
            deal_id: deal_id.to_string(),
            frameworks: BTreeMap::new(),
        }
    }

    pub fn state_of(&self, key: FrameworkKey) -> FrameworkState {
        self.frameworks.get(&key).copied().unwrap_or_default()
    }

    pub fn status_of(&self, key: FrameworkKey) -> FrameworkStatus {
        self.state_of(key).status
    }

    /// Moves a pending framework to in progress. Other states are kept.
    pub fn start(&mut self, key: FrameworkKey) {
        let state = self.frameworks.entry(key).or_default();
        if state.status == FrameworkStatus::Pending {
            state.status = FrameworkStatus::InProgress;
        }
    }

    /// Marks a framework completed, optionally with a 0-100 score.
    pub fn complete(&mut self, key: FrameworkKey, score: Option<u8>) -> Result<()> {
        if let Some(score) = score {
            if score > MAX_SCORE {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Framework score must be between 0 and {}, got {}",
                    MAX_SCORE, score
                ))));
            }
        }
        self.frameworks.insert(
            key,
            FrameworkState {
                status: FrameworkStatus::Completed,
                score,
            },
        );
        Ok(())
    }

    /// Returns a framework to pending and drops its score.
    pub fn reset(&mut self, key: FrameworkKey) {
        self.frameworks.remove(&key);
    }

    pub fn completed_count(&self) -> usize {
        self.frameworks
            .values()
            .filter(|s| s.status == FrameworkStatus::Completed)
            .count()
    }

    /// Completed share of the six frameworks, 0.0 to 1.0.
    pub fn overall_progress(&self) -> f64 {
        self.completed_count() as f64 / FrameworkKey::ALL.len() as f64
    }

    /// Mean score of completed, scored frameworks.
    pub fn average_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .frameworks
            .values()
            .filter(|s| s.status == FrameworkStatus::Completed)
            .filter_map(|s| s.score.map(f64::from))
            .collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }
}
