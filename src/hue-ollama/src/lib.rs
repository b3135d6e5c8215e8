//! Ollama client for Hue
//!
//! This crate delivers prompts to an Ollama-compatible text generation server
//! and returns the raw generated text. Delivery is retried with exponential
//! backoff, and a final attempt goes over a separate blocking transport before
//! the call gives up.

mod client;
mod config;
mod models;
mod retry;

pub use client::OllamaClient;
pub use config::{OllamaConfig, RetryConfig};
pub use models::{GenerateRequest, ModelTag, ResponseShape, TagsResponse};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper, retry};

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "llama3.1";

/// Default Ollama server URL
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Error types for Ollama operations
#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    /// Every delivery attempt failed; carries the most recent failure.
    #[error("Generation failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },

    #[error("Server returned error: {0}")]
    ServerError(String),

    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Response contained no generated text")]
    EmptyResponse,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Ollama operations
pub type Result<T> = std::result::Result<T, OllamaError>;
