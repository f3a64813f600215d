//! UI error types

use crate::dataset::DatasetError;
use crate::query::LocationError;
use thiserror::Error;

/// Errors that can occur while the browser is running
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal I/O failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The dataset could not be loaded
    #[error("Dataset error: {0}")]
    DatasetError(#[from] DatasetError),

    /// The starting query string could not be read
    #[error("Location error: {0}")]
    LocationError(#[from] LocationError),

    /// The system clipboard is unavailable or rejected the write
    #[error("Clipboard error: {0}")]
    ClipboardError(String),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;

impl From<arboard::Error> for UiError {
    fn from(e: arboard::Error) -> Self {
        Self::ClipboardError(e.to_string())
    }
}

/// Copy `text` to the system clipboard
///
/// # Errors
///
/// Returns `UiError::ClipboardError` if no clipboard is available or the
/// write fails.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: UiError = std::io::Error::other("tty gone").into();
        assert!(matches!(err, UiError::IoError(_)));
        assert!(err.to_string().contains("tty gone"));
    }

    #[test]
    fn test_dataset_error_conversion() {
        let err: UiError = DatasetError::PreviouslyFailed("boom".to_string()).into();
        assert!(matches!(err, UiError::DatasetError(_)));
    }
}
