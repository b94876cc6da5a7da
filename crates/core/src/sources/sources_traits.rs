//! Listing source traits.
//!
//! These describe the backend the product reads from without any transport
//! details, so the services can run against an HTTP client, a fixture or a
//! test double.

use async_trait::async_trait;

use crate::deals::DealRecord;
use crate::errors::FetchError;
use crate::portfolio::PortfolioCompany;

/// Source of the deal pipeline listing.
#[async_trait]
pub trait DealSourceTrait: Send + Sync {
    /// Fetches the full deal list. The result replaces any previous list.
    async fn fetch_deals(&self) -> std::result::Result<Vec<DealRecord>, FetchError>;
}

/// Source of the funded portfolio listing.
#[async_trait]
pub trait PortfolioSourceTrait: Send + Sync {
    /// Fetches every portfolio company, archived ones included.
    async fn fetch_portfolio(&self) -> std::result::Result<Vec<PortfolioCompany>, FetchError>;
}

/// Source used when no backend is configured. Every fetch reports the
/// backend as unavailable, which sends the services to their fixtures.
#[derive(Debug, Clone, Default)]
pub struct OfflineSource;

#[async_trait]
impl DealSourceTrait for OfflineSource {
    async fn fetch_deals(&self) -> std::result::Result<Vec<DealRecord>, FetchError> {
        Err(FetchError::Unavailable("no backend configured".to_string()))
    }
}

#[async_trait]
impl PortfolioSourceTrait for OfflineSource {
    async fn fetch_portfolio(&self) -> std::result::Result<Vec<PortfolioCompany>, FetchError> {
        Err(FetchError::Unavailable("no backend configured".to_string()))
    }
}
