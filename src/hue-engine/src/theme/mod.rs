//! Theme generation: prompt the model, extract colors, persist best-effort.


use std::sync::Arc;
use std::time::Duration;

use hue_color::{ColorRecord, NamedColorIndex};
use hue_ollama::{DEFAULT_MODEL, OllamaClient};
use hue_storage::{ColorStore, NewTheme};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::extract::{ExtractionMethod, extract};
use crate::normalize::normalize;
use crate::prompt::designer_prompt;

/// Default time to wait for the theme to be persisted. A zero timeout
/// detaches the write entirely.
pub const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_millis(250);

/// A theme generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRequest {
    pub prompt: String,
    /// Model to request; empty or absent uses the service default.
    #[serde(default)]
    pub model: Option<String>,
}

impl ThemeRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// How a theme was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMetadata {
    pub model_used: String,
    pub raw_response: String,
    pub extraction_method: ExtractionMethod,
    /// Set when generation, extraction or persistence went wrong.
    pub error: Option<String>,
}

/// Outcome of a theme generation. `colors` is empty whenever generation or
/// extraction failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeGenerationResult {
    pub colors: Vec<ColorRecord>,
    pub metadata: ThemeMetadata,
}

impl ThemeGenerationResult {
    fn failed(
        model_used: String,
        raw_response: String,
        method: ExtractionMethod,
        error: EngineError,
    ) -> Self {
        Self {
            colors: Vec::new(),
            metadata: ThemeMetadata {
                model_used,
                raw_response,
                extraction_method: method,
                error: Some(error.to_string()),
            },
        }
    }
}

/// Generates color themes from natural language descriptions.
pub struct ThemeService {
    client: OllamaClient,
    index: Arc<NamedColorIndex>,
    store: Option<Arc<dyn ColorStore>>,
    default_model: String,
    persist_timeout: Duration,
}

impl ThemeService {
    pub fn new(client: OllamaClient, index: Arc<NamedColorIndex>) -> Self {
        Self {
            client,
            index,
            store: None,
            default_model: DEFAULT_MODEL.to_string(),
            persist_timeout: DEFAULT_PERSIST_TIMEOUT,
        }
    }

    /// Persist generated themes to `store`.
    pub fn with_store(mut self, store: Arc<dyn ColorStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_persist_timeout(mut self, timeout: Duration) -> Self {
        self.persist_timeout = timeout;
        self
    }

    /// Generate a theme.
    ///
    /// Only an empty prompt is an error. Every other failure is reported in
    /// `metadata.error`; a persistence failure leaves `colors` intact.
    pub async fn generate(&self, request: &ThemeRequest) -> Result<ThemeGenerationResult> {
        let description = request.prompt.trim();
        if description.is_empty() {
            return Err(EngineError::InvalidRequest("prompt must not be empty".to_string()));
        }

        let requested = request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_model.as_str());
        let model_used = self.client.resolve_model(requested).await;

        let raw_response = match self
            .client
            .generate(&designer_prompt(description), &model_used)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(model = %model_used, error = %e, "Theme generation failed");
                return Ok(ThemeGenerationResult::failed(
                    model_used,
                    String::new(),
                    ExtractionMethod::NoMatch,
                    EngineError::Generation(e),
                ));
            }
        };

        let extraction = extract(&raw_response);
        let colors = normalize(&extraction.candidates, &self.index);
        if colors.is_empty() {
            warn!(
                model = %model_used,
                method = %extraction.method,
                candidates = extraction.candidates.len(),
                "Model output contained no valid colors"
            );
            return Ok(ThemeGenerationResult::failed(
                model_used,
                raw_response,
                extraction.method,
                EngineError::NoValidColors,
            ));
        }

        info!(
            model = %model_used,
            method = %extraction.method,
            colors = colors.len(),
            "Generated theme"
        );

        let error = match &self.store {
            Some(store) => {
                let theme = NewTheme {
                    prompt: description.to_string(),
                    model: model_used.clone(),
                    colors: colors.clone(),
                };
                self.persist(Arc::clone(store), theme).await
            }
            None => None,
        };

        Ok(ThemeGenerationResult {
            colors,
            metadata: ThemeMetadata {
                model_used,
                raw_response,
                extraction_method: extraction.method,
                error,
            },
        })
    }

    /// Save `theme` on a background task, waiting at most `persist_timeout`.
    /// Returns the error to report, if any. A write that outlives the wait
    /// keeps running. With a zero timeout the write is not awaited at all and
    /// its failures are only logged.
    async fn persist(&self, store: Arc<dyn ColorStore>, theme: NewTheme) -> Option<String> {
        if self.persist_timeout.is_zero() {
            tokio::spawn(async move {
                match store.save_theme(theme).await {
                    Ok(id) => debug!(id, "Theme persisted"),
                    Err(e) => warn!(error = %e, "Failed to persist theme"),
                }
            });
            return None;
        }

        let task = tokio::spawn(async move { store.save_theme(theme).await });

        match tokio::time::timeout(self.persist_timeout, task).await {
            Ok(Ok(Ok(id))) => {
                debug!(id, "Theme persisted");
                None
            }
            Ok(Ok(Err(e))) => {
                warn!(error = %e, "Failed to persist theme");
                Some(EngineError::Persistence(e).to_string())
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Theme persistence task failed");
                Some(format!("Persistence failed: task error: {e}"))
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.persist_timeout.as_millis() as u64,
                    "Theme persistence still pending"
                );
                Some(format!(
                    "Persistence still pending after {}ms",
                    self.persist_timeout.as_millis()
                ))
            }
        }
    }
}
