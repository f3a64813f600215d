//! Templar - a terminal catalog for automation templates
//!
//! This library loads a fixed catalog of template records once and runs a
//! deterministic query pipeline over it: use-case partition, fuzzy text
//! search, category filter, and sort. The interactive browser and the
//! scripting commands both drive the same [`query::QueryEngine`].

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod model;
pub mod output;
pub mod query;
pub mod search;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TemplarError {
    /// Dataset could not be loaded or written
    #[error("Dataset error: {0}")]
    DatasetError(#[from] dataset::DatasetError),
    /// Location could not be read or written
    #[error("Location error: {0}")]
    LocationError(#[from] query::LocationError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, TemplarError>;
