//! Deals module - domain models, services, and traits.

mod deals_model;
mod deals_service;
mod deals_traits;


// Re-export the public interface
pub use deals_model::{DealRecord, DealStage, Financials, PipelineStatus};
pub use deals_service::DealService;
pub use deals_traits::DealServiceTrait;
