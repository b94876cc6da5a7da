//! Query models for the deal pipeline table.

use serde::{Deserialize, Serialize};

use crate::constants::STATUS_FILTER_ALL;
use crate::utils::normalize_status;

/// Comparator selected by the pipeline table's sort control.
///
/// Unknown keys map to `Unsorted`, which keeps the listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Company name, ascending
    Company,
    /// Upload date, most recent first
    UploadDate,
    /// Parsed ask amount, largest first
    Amount,
    /// Deal score, highest first
    Score,
    #[default]
    Unsorted,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Company => "company",
            SortKey::UploadDate => "uploadDate",
            SortKey::Amount => "amount",
            SortKey::Score => "score",
            SortKey::Unsorted => "none",
        }
    }
}

impl From<&str> for SortKey {
    fn from(key: &str) -> Self {
        match key.trim() {
            "company" | "companyName" => SortKey::Company,
            "uploadDate" | "upload_date" | "date" => SortKey::UploadDate,
            "amount" | "askAmount" => SortKey::Amount,
            "score" | "dealScore" => SortKey::Score,
            _ => SortKey::Unsorted,
        }
    }
}

impl From<String> for SortKey {
    fn from(key: String) -> Self {
        SortKey::from(key.as_str())
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

/// Status filter of the pipeline table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    /// Normalized status value (lowercase, underscores)
    Status(String),
}

impl StatusFilter {
    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(expected) => normalize_status(status) == *expected,
        }
    }
}

impl From<&str> for StatusFilter {
    fn from(value: &str) -> Self {
        let normalized = normalize_status(value);
        if normalized.is_empty() || normalized == STATUS_FILTER_ALL {
            StatusFilter::All
        } else {
            StatusFilter::Status(normalized)
        }
    }
}

impl From<String> for StatusFilter {
    fn from(value: String) -> Self {
        StatusFilter::from(value.as_str())
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => STATUS_FILTER_ALL.to_string(),
            StatusFilter::Status(value) => value,
        }
    }
}

/// Search, filter and sort state of the pipeline table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealQuery {
    pub search_text: String,
    pub status_filter: StatusFilter,
    pub sort_key: SortKey,
}

impl DealQuery {
    pub fn new(search_text: &str, status_filter: &str, sort_key: &str) -> Self {
        Self {
            search_text: search_text.to_string(),
            status_filter: StatusFilter::from(status_filter),
            sort_key: SortKey::from(sort_key),
        }
    }
}
