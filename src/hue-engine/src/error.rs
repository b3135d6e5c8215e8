//! Engine error types.

use hue_color::ColorError;
use hue_ollama::OllamaError;
use hue_storage::StorageError;
use thiserror::Error;

/// Errors raised by engine operations.
///
/// Theme generation only returns `InvalidRequest` as an error; generation,
/// extraction and persistence failures are reported in the result metadata
/// using this type's display text.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown color name: {0}")]
    UnknownName(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] OllamaError),

    #[error("No valid colors found in model output")]
    NoValidColors,

    #[error("Persistence failed: {0}")]
    Persistence(#[from] StorageError),
}

impl From<ColorError> for EngineError {
    fn from(err: ColorError) -> Self {
        match err {
            ColorError::InvalidColor(input) => EngineError::InvalidColor(input),
            ColorError::UnknownName(name) => EngineError::UnknownName(name),
            other => EngineError::InvalidColor(other.to_string()),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
