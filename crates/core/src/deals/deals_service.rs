use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use super::{DealRecord, DealServiceTrait};
use crate::aggregate::{aggregate_scored, DealSummary};
use crate::errors::{Error, Result};
use crate::pipeline::{filter_and_sort_scored, DealQuery};
use crate::scoring::{score_deal, score_deals, ScoredDeal, ScoringPolicy};
use crate::sources::{DataOrigin, DealSourceTrait, RefreshOutcome, SnapshotInfo, SnapshotStore};

/// Service behind the deal pipeline screens.
///
/// Holds the latest deal list, the fixture used when the source fails, and
/// the scoring policy applied on every read.
pub struct DealService {
    source: Arc<dyn DealSourceTrait>,
    fallback: Vec<DealRecord>,
    policy: ScoringPolicy,
    store: SnapshotStore<DealRecord>,
}

impl DealService {
    /// Creates a service that serves the fallback list until the first
    /// refresh completes.
    pub fn new(
        source: Arc<dyn DealSourceTrait>,
        fallback: Vec<DealRecord>,
        policy: ScoringPolicy,
    ) -> Self {
        let store = SnapshotStore::new(fallback.clone(), DataOrigin::Fallback);
        Self {
            source,
            fallback,
            policy,
            store,
        }
    }

    fn scored(&self) -> Vec<ScoredDeal> {
        score_deals(&self.store.records(), &self.policy)
    }
}

#[async_trait]
impl DealServiceTrait for DealService {
    async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.store.begin();
        debug!("Refreshing deals (ticket {})", ticket);

        let (deals, origin) = match self.source.fetch_deals().await {
            Ok(deals) => {
                let fetched = deals.len();
                let valid: Vec<DealRecord> = deals
                    .into_iter()
                    .filter(|d| match d.validate() {
                        Ok(()) => true,
                        Err(e) => {
                            warn!("Skipping invalid deal '{}': {}", d.id, e);
                            false
                        }
                    })
                    .collect();
                debug!("Fetched {} deals ({} valid)", fetched, valid.len());
                (valid, DataOrigin::Live)
            }
            Err(e) => {
                warn!("Deal fetch failed, using fallback data: {}", e);
                (self.fallback.clone(), DataOrigin::Fallback)
            }
        };

        let outcome = self.store.commit(ticket, deals, origin);
        info!("Deal refresh {}: {:?}", ticket, outcome);
        outcome
    }

    fn list_deals(&self, query: &DealQuery) -> Vec<ScoredDeal> {
        filter_and_sort_scored(&self.scored(), query)
    }

    fn summarize(&self, query: &DealQuery) -> DealSummary {
        aggregate_scored(&self.list_deals(query))
    }

    fn get_deal(&self, deal_id: &str) -> Result<ScoredDeal> {
        self.store
            .records()
            .iter()
            .find(|d| d.id == deal_id)
            .map(|d| score_deal(d, &self.policy))
            .ok_or_else(|| Error::NotFound(format!("deal '{}'", deal_id)))
    }

    fn scoring_policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    fn snapshot_info(&self) -> SnapshotInfo {
        self.store.info()
    }
}
