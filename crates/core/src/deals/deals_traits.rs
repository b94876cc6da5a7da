//! Deal service trait.

use async_trait::async_trait;

use crate::aggregate::DealSummary;
use crate::errors::Result;
use crate::pipeline::DealQuery;
use crate::scoring::{ScoredDeal, ScoringPolicy};
use crate::sources::{RefreshOutcome, SnapshotInfo};

/// Trait defining the contract for the deal pipeline service.
///
/// Read operations work on the list committed by the latest refresh; they
/// never touch the network.
#[async_trait]
pub trait DealServiceTrait: Send + Sync {
    /// Re-fetches the deal list. On failure the fixture replaces the list
    /// and the snapshot is marked as fallback data.
    async fn refresh(&self) -> RefreshOutcome;

    /// Scored, filtered and sorted listing.
    fn list_deals(&self, query: &DealQuery) -> Vec<ScoredDeal>;

    /// Summary over the listing `query` selects.
    fn summarize(&self, query: &DealQuery) -> DealSummary;

    /// Retrieves a scored deal by ID.
    fn get_deal(&self, deal_id: &str) -> Result<ScoredDeal>;

    fn scoring_policy(&self) -> &ScoringPolicy;

    fn snapshot_info(&self) -> SnapshotInfo;
}
