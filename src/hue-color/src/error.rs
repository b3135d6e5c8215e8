//! Error types for hue-color.

use thiserror::Error;

/// Color error types.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Input is not a 3 or 6 digit hex color.
    #[error("Invalid hex color: {0:?}")]
    InvalidColor(String),

    /// Name is not present in the named color index.
    #[error("Unknown color name: {0}")]
    UnknownName(String),

    /// Named color source could not be parsed.
    #[error("Invalid color list: {0}")]
    Source(#[from] serde_json::Error),

    /// Named color source could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for color operations.
pub type Result<T> = std::result::Result<T, ColorError>;
