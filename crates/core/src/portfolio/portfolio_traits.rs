use async_trait::async_trait;

use super::{PortfolioCompany, PortfolioSummary};
use crate::errors::Result;
use crate::sources::{RefreshOutcome, SnapshotInfo};

/// Trait for portfolio service operations
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Re-fetches the portfolio, substituting the fixture on failure.
    async fn refresh(&self) -> RefreshOutcome;

    /// Lists companies in listing order, optionally including archived ones.
    fn list_companies(&self, include_archived: bool) -> Vec<PortfolioCompany>;

    fn get_company(&self, company_id: &str) -> Result<PortfolioCompany>;

    /// Summary over the whole portfolio.
    fn summary(&self) -> PortfolioSummary;

    /// Archives a company. Archiving twice is not an error.
    fn archive_company(&self, company_id: &str) -> Result<PortfolioCompany>;

    fn snapshot_info(&self) -> SnapshotInfo;
}
