use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the records currently held by a store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataOrigin {
    /// Fetched from the backend
    Live,
    /// Substituted from the built-in fixture after a failed fetch
    #[default]
    Fallback,
}

/// Result of a refresh attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum RefreshOutcome {
    /// The fetched (or fallback) list replaced the store contents.
    Applied { origin: DataOrigin, count: usize },
    /// A newer refresh had already committed; this result was discarded.
    Stale { ticket: u64 },
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

/// Metadata about the list currently held by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub origin: DataOrigin,
    pub count: usize,
    pub ticket: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}
