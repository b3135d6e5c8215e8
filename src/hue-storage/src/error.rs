//! Error types for hue-storage.

use thiserror::Error;

/// Storage error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A color with this hex value is already stored.
    #[error("Color {0} is already saved")]
    DuplicateHex(String),

    /// No saved color has this id.
    #[error("Color not found: {0}")]
    NotFound(u64),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Home directory not found.
    #[error("Could not determine home/data directory")]
    HomeDirNotFound,

    /// The store was closed.
    #[error("Store is closed")]
    Closed,
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
