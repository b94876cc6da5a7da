//! Dealflow Core - Domain entities, services, and traits.
//!
//! This crate contains the deal intelligence logic: scoring, the pipeline
//! filter/sort chain, aggregation, analysis frameworks and portfolio
//! roll-ups. It is transport-agnostic and defines the source and sink traits
//! that are implemented by the `backend` crate.

pub mod aggregate;
pub mod constants;
pub mod deals;
pub mod errors;
pub mod frameworks;
pub mod notes;
pub mod pipeline;
pub mod portfolio;
pub mod scoring;
pub mod sources;
pub mod utils;

// Re-export the types every caller touches
pub use deals::{DealRecord, DealStage, Financials};
pub use scoring::{ScoredDeal, ScoringPolicy};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
