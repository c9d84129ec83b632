//! Error types for the Doxa library.
//!
//! All failures are represented by the [`DoxaError`] enum. Numeric edge
//! cases in scoring (zero document counts, all-zero score vectors) are
//! handled locally by the components involved and never surface here.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Doxa operations.
#[derive(Error, Debug)]
pub enum DoxaError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The corpus backend could not be reached or failed a query.
    ///
    /// Surfaced to the caller immediately; retry policy belongs to the
    /// backend client, not the core.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Analysis-related errors (tokenization requests)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Label registry errors (empty corpus, missing label buckets)
    #[error("Label error: {0}")]
    Label(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with DoxaError.
pub type Result<T> = std::result::Result<T, DoxaError>;

impl DoxaError {
    /// Create a new backend error.
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        DoxaError::Backend(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        DoxaError::Analysis(msg.into())
    }

    /// Create a new label error.
    pub fn label<S: Into<String>>(msg: S) -> Self {
        DoxaError::Label(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        DoxaError::InvalidOperation(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        DoxaError::SerializationError(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        DoxaError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DoxaError::Other(msg.into())
    }
}
