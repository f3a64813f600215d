//! Dataset loading error types

use thiserror::Error;

/// Errors that can occur while loading the template dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("Failed to read dataset '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The dataset could not be parsed as a JSON array of templates
    #[error("Failed to parse dataset: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The dataset could not be written
    #[error("Failed to write dataset: {0}")]
    WriteError(#[from] std::io::Error),

    /// An earlier load attempt on this loader failed; loads are not retried
    #[error("Dataset load already failed: {0}")]
    PreviouslyFailed(String),

    /// The dataset was loaded but is unusable for the requested operation
    #[error("Invalid dataset: {0}")]
    Invalid(String),
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;
