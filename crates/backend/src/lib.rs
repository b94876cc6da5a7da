//! Dealflow Backend - HTTP adapters for the deal flow REST backend.
//!
//! The [`BackendClient`] implements the core source and sink traits, so the
//! services can run against the live backend or against fixtures without
//! knowing which.

mod client;

pub use client::BackendClient;
