//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal could not be set up, drawn to or restored
    #[error("Terminal error: {0}")]
    IoError(#[from] std::io::Error),

    /// Output could not be serialized
    #[error("Failed to serialize output: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
