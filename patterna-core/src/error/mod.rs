//! Core error types for Patterna

use thiserror::Error;

/// Main error type for Patterna operations
#[derive(Error, Debug)]
pub enum PatternaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A value handed to an aligner or collector violates its contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The input is structurally valid but carries nothing to work on.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for Patterna operations
pub type PatternaResult<T> = Result<T, PatternaError>;

impl PatternaError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        PatternaError::InvalidInput(msg.into())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        PatternaError::DegenerateInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        PatternaError::Configuration(msg.into())
    }
}

impl From<serde_json::Error> for PatternaError {
    fn from(err: serde_json::Error) -> Self {
        PatternaError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for PatternaError {
    fn from(err: anyhow::Error) -> Self {
        PatternaError::Other(err.to_string())
    }
}
