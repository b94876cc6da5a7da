//! Sources module - listing source traits, fallback fixtures and the
//! last-write-wins snapshot store.

mod fixtures;
mod snapshot_store;
mod sources_model;
mod sources_traits;

pub use fixtures::{fallback_deals, fallback_portfolio};
pub use snapshot_store::SnapshotStore;
pub use sources_model::{DataOrigin, RefreshOutcome, SnapshotInfo};
pub use sources_traits::{DealSourceTrait, OfflineSource, PortfolioSourceTrait};
