//! Core error types for the Dealflow application.
//!
//! The pure computations (scoring, pipeline, aggregation) never fail. These
//! types cover validation, configuration and the data-source boundary.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the deal intelligence application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Data source error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

/// Failure of a remote listing source or sink.
///
/// Callers of the listing sources recover from these by substituting a
/// fixture dataset; they never reach the scoring or pipeline functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Backend responded with status {code}")]
    Status { code: u16 },

    #[error("Failed to decode backend payload: {0}")]
    Decode(String),

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
