use async_trait::async_trait;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use super::portfolio_summary::summarize_portfolio;
use super::{PortfolioCompany, PortfolioServiceTrait, PortfolioSummary};
use crate::errors::{Error, Result};
use crate::sources::{
    DataOrigin, PortfolioSourceTrait, RefreshOutcome, SnapshotInfo, SnapshotStore,
};

/// Service for the portfolio screens.
///
/// Archiving is recorded locally and re-applied to every refreshed list
/// inside the commit, so a refresh never brings an archived company back,
/// even one archived while the fetch was in flight.
pub struct PortfolioService {
    source: Arc<dyn PortfolioSourceTrait>,
    fallback: Vec<PortfolioCompany>,
    store: SnapshotStore<PortfolioCompany>,
    archived_ids: RwLock<HashSet<String>>,
}

impl PortfolioService {
    /// Creates a service that starts out on the fallback list until the
    /// first refresh completes.
    pub fn new(source: Arc<dyn PortfolioSourceTrait>, fallback: Vec<PortfolioCompany>) -> Self {
        let store = SnapshotStore::new(fallback.clone(), DataOrigin::Fallback);
        Self {
            source,
            fallback,
            store,
            archived_ids: RwLock::new(HashSet::new()),
        }
    }

    fn apply_local_archives(&self, companies: &mut [PortfolioCompany]) {
        let archived = self.archived_ids.read().unwrap_or_else(PoisonError::into_inner);
        companies
            .iter_mut()
            .filter(|c| archived.contains(&c.id))
            .for_each(PortfolioCompany::archive);
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.store.begin();
        let (companies, origin) = match self.source.fetch_portfolio().await {
            Ok(companies) => {
                let fetched = companies.len();
                let valid: Vec<PortfolioCompany> = companies
                    .into_iter()
                    .filter(|c| match c.validate() {
                        Ok(()) => true,
                        Err(e) => {
                            warn!("Skipping invalid portfolio company '{}': {}", c.id, e);
                            false
                        }
                    })
                    .collect();
                debug!("Fetched {} portfolio companies ({} valid)", fetched, valid.len());
                (valid, DataOrigin::Live)
            }
            Err(e) => {
                warn!("Portfolio fetch failed, using fallback data: {}", e);
                (self.fallback.clone(), DataOrigin::Fallback)
            }
        };
        let outcome = self
            .store
            .commit_with(ticket, companies, origin, |companies| {
                self.apply_local_archives(companies)
            });
        info!("Portfolio refresh {}: {:?}", ticket, outcome);
        outcome
    }

    fn list_companies(&self, include_archived: bool) -> Vec<PortfolioCompany> {
        self.store
            .records()
            .iter()
            .filter(|c| include_archived || !c.archived)
            .cloned()
            .collect()
    }

    fn get_company(&self, company_id: &str) -> Result<PortfolioCompany> {
        self.store
            .records()
            .iter()
            .find(|c| c.id == company_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("portfolio company '{}'", company_id)))
    }

    fn summary(&self) -> PortfolioSummary {
        summarize_portfolio(&self.store.records())
    }

    fn archive_company(&self, company_id: &str) -> Result<PortfolioCompany> {
        debug!("Archiving portfolio company {}", company_id);
        // Recorded before the edit so a refresh committing in between keeps it
        let newly_recorded = self
            .archived_ids
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(company_id.to_string());
        match self
            .store
            .update_where(|c| c.id == company_id, PortfolioCompany::archive)
        {
            Some(archived) => Ok(archived),
            None => {
                if newly_recorded {
                    self.archived_ids
                        .write()
                        .unwrap_or_else(PoisonError::into_inner)
                        .remove(company_id);
                }
                Err(Error::NotFound(format!("portfolio company '{}'", company_id)))
            }
        }
    }

    fn snapshot_info(&self) -> SnapshotInfo {
        self.store.info()
    }
}
