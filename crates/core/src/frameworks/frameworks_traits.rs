//! Analysis service trait.

use super::{AnalysisView, FrameworkConfig, FrameworkKey};
use crate::deals::DealRecord;
use crate::errors::Result;

/// Trait defining the contract for the framework analysis workflow.
pub trait AnalysisServiceTrait: Send + Sync {
    fn framework_config(&self) -> &FrameworkConfig;

    /// Current analysis state of `deal`. Deals never analyzed get a fresh,
    /// unsaved session.
    fn view(&self, deal: &DealRecord) -> AnalysisView;

    /// Jumps the deal's session to `key`, starting it.
    fn select(&self, deal: &DealRecord, key: FrameworkKey) -> Result<AnalysisView>;

    /// Completes `key` with an optional 0-100 score.
    fn complete(
        &self,
        deal: &DealRecord,
        key: FrameworkKey,
        score: Option<u8>,
    ) -> Result<AnalysisView>;

    /// Discards the session of `deal_id`. Returns whether one existed.
    fn reset(&self, deal_id: &str) -> bool;
}
