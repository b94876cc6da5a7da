//! Aggregate module - summary statistics over deal listings.

mod aggregator;
mod summary_model;

pub use aggregator::{aggregate, aggregate_scored};
pub use summary_model::DealSummary;
