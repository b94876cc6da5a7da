use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Headline figures above the deal pipeline table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealSummary {
    pub count: usize,
    /// Sum of parsed ask amounts, in millions
    pub total_value: Decimal,
    pub completed_count: usize,
    pub in_progress_count: usize,
    pub average_growth: f64,
    /// Record counts keyed by normalized status
    pub by_status: BTreeMap<String, usize>,
    /// Mean deal score; only present for scored listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
}
