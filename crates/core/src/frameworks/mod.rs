//! Frameworks module - analysis frameworks, per-deal sessions and the
//! handler registry.

mod analysis_service;
mod analysis_session;
mod frameworks_model;
mod frameworks_registry;
mod frameworks_traits;

#[cfg(test)]
mod frameworks_model_tests;

pub use analysis_service::{AnalysisService, AnalysisView, FrameworkView};
pub use analysis_session::AnalysisSession;
pub use frameworks_model::{
    FrameworkConfig, FrameworkDescriptor, FrameworkKey, FrameworkProgress, FrameworkState,
    FrameworkStatus,
};
pub use frameworks_registry::{
    FrameworkHandler, FrameworkRegistry, ManualHandler, RunwayHandler, SubScoreHandler,
};
pub use frameworks_traits::AnalysisServiceTrait;
