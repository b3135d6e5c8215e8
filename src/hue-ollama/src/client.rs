//! Ollama client implementation

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::OllamaConfig;
use crate::models::{GenerateRequest, ModelTag, ResponseShape, TagsResponse};
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper, retry};
use crate::{OllamaError, Result};

/// Timeout for the model listing call; it should answer quickly or not at all.
const LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for an Ollama-compatible generation server.
///
/// The client holds no per-call state; clones share the connection pool.
#[derive(Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    connect_timeout: Duration,
    request_timeout: Duration,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaClient")
            .field("base_url", &self.base_url)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl OllamaClient {
    /// Create a client from validated configuration.
    ///
    /// No request is made here; an unreachable server surfaces on first use.
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            connect_timeout: config.connect_timeout(),
            request_timeout: config.request_timeout(),
            policy: config.retry.policy(),
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Replace the backoff sleeper.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch the installed models from `GET /api/tags`.
    pub async fn list_models(&self) -> Result<Vec<ModelTag>> {
        let response = self
            .client
            .get(self.endpoint("api/tags"))
            .timeout(LIST_TIMEOUT)
            .send()
            .await?;

        if response.status().is_success() {
            let tags: TagsResponse = response.json().await?;
            Ok(tags.models)
        } else {
            Err(OllamaError::ServerError(format!(
                "Failed to list models: {}",
                response.status()
            )))
        }
    }

    /// Pick the model to generate with.
    ///
    /// Returns `requested` when it is installed, when nothing is installed, or
    /// when the listing call fails. Otherwise the first installed model is
    /// substituted. A tag of `<requested>:latest` counts as installed.
    pub async fn resolve_model(&self, requested: &str) -> String {
        let models = match self.list_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!(model = %requested, error = %e, "Could not list models, using requested model");
                return requested.to_string();
            }
        };

        let latest = format!("{requested}:latest");
        let installed = models.iter().any(|m| {
            m.name.eq_ignore_ascii_case(requested) || m.name.eq_ignore_ascii_case(&latest)
        });

        match models.first() {
            Some(first) if !installed => {
                warn!(
                    requested = %requested,
                    substitute = %first.name,
                    "Requested model is not installed, substituting"
                );
                first.name.clone()
            }
            _ => requested.to_string(),
        }
    }

    /// Generate text for `prompt` with `model`.
    ///
    /// Makes up to `policy.max_attempts` attempts over the pooled client with
    /// backoff between them, then one last attempt over a fresh blocking
    /// HTTP/1.1 connection. Fails with [`OllamaError::Exhausted`] carrying the
    /// last failure.
    pub async fn generate(&self, prompt: &str, model: &str) -> Result<String> {
        let request = GenerateRequest::new(model, prompt);
        let request_ref = &request;

        let primary = retry(&self.policy, self.sleeper.as_ref(), move |attempt| {
            self.attempt(request_ref, attempt)
        })
        .await;

        match primary {
            Ok(text) => return Ok(text),
            Err(e) => warn!(
                model = %model,
                attempts = self.policy.max_attempts,
                error = %e,
                "Primary transport exhausted, trying alternate transport"
            ),
        }

        self.attempt_alternate(request).await.map_err(|e| {
            warn!(model = %model, error = %e, "Alternate transport failed");
            OllamaError::Exhausted {
                attempts: self.policy.max_attempts + 1,
                last: e.to_string(),
            }
        })
    }

    async fn attempt(&self, request: &GenerateRequest, attempt: u32) -> Result<String> {
        debug!(attempt, model = %request.model, "Sending generation request");

        let response = self
            .client
            .post(self.endpoint("api/generate"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::ServerError(format!(
                "Generation failed: {status} - {body}"
            )));
        }

        let body = response.text().await?;
        decode_body(&body)
    }

    async fn attempt_alternate(&self, request: GenerateRequest) -> Result<String> {
        let url = self.endpoint("api/generate");
        let connect_timeout = self.connect_timeout;
        let request_timeout = self.request_timeout;

        debug!(model = %request.model, "Sending generation request over alternate transport");

        let task = tokio::task::spawn_blocking(move || -> Result<String> {
            let client = reqwest::blocking::Client::builder()
                .connect_timeout(connect_timeout)
                .timeout(request_timeout)
                .http1_only()
                .pool_max_idle_per_host(0)
                .build()?;

            let response = client.post(&url).json(&request).send()?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(OllamaError::ServerError(format!(
                    "Generation failed: {status} - {body}"
                )));
            }

            let body = response.text()?;
            decode_body(&body)
        });

        task.await.map_err(|e| {
            OllamaError::ServerError(format!("Alternate transport task failed: {e}"))
        })?
    }
}

fn decode_body(body: &str) -> Result<String> {
    let shape = ResponseShape::decode(body).ok_or(OllamaError::EmptyResponse)?;
    debug!(shape = shape.kind(), bytes = body.len(), "Decoded generation response");
    Ok(shape.into_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.delays.lock().unwrap().push(duration);
        }
    }

    fn client_for(server: &MockServer) -> (OllamaClient, Arc<RecordingSleeper>) {
        let config = OllamaConfig {
            base_url: format!("{}/", server.uri()),
            retry: RetryConfig::default(),
            ..OllamaConfig::default()
        };
        let sleeper = Arc::new(RecordingSleeper::default());
        let client = OllamaClient::new(&config)
            .expect("client")
            .with_sleeper(sleeper.clone());
        (client, sleeper)
    }

    fn json_body(value: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(value.to_string(), "application/json")
    }

    #[tokio::test]
    async fn test_generate_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(serde_json::json!({
                "model": "llama3.1",
                "prompt": "ocean",
                "stream": false
            })))
            .respond_with(json_body(serde_json::json!({
                "model": "llama3.1",
                "response": "[\"#006994\", \"#40E0D0\"]",
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, sleeper) = client_for(&server);
        assert_eq!(client.base_url(), server.uri());

        let text = client.generate("ocean", "llama3.1").await.expect("generate");
        assert_eq!(text, "[\"#006994\", \"#40E0D0\"]");
        assert!(sleeper.delays.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model is loading"))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(json_body(serde_json::json!({"response": "#123456"})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, sleeper) = client_for(&server);
        let text = client.generate("dusk", "llama3.1").await.expect("generate");

        assert_eq!(text, "#123456");
        assert_eq!(
            *sleeper.delays.lock().unwrap(),
            vec![Duration::from_millis(500), Duration::from_secs(1)]
        );
    }

    #[tokio::test]
    async fn test_alternate_transport_after_exhaustion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(3)
            .expect(3)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(json_body(serde_json::json!({"text": "[\"#ABCDEF\"]"})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, sleeper) = client_for(&server);
        let text = client.generate("forest", "llama3.1").await.expect("generate");

        assert_eq!(text, "[\"#ABCDEF\"]");
        assert_eq!(sleeper.delays.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(4)
            .mount(&server)
            .await;

        let (client, _sleeper) = client_for(&server);
        let err = client.generate("anything", "llama3.1").await.unwrap_err();

        match err {
            OllamaError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 4);
                assert!(last.contains("500"), "last was {last}");
                assert!(last.contains("boom"), "last was {last}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_body_counts_as_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("   "))
            .mount(&server)
            .await;

        let (client, _sleeper) = client_for(&server);
        let err = client.generate("anything", "llama3.1").await.unwrap_err();
        assert!(matches!(err, OllamaError::Exhausted { .. }));
        assert!(err.to_string().contains("no generated text"));
    }

    #[tokio::test]
    async fn test_plain_text_body_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("try ff00aa"))
            .mount(&server)
            .await;

        let (client, _sleeper) = client_for(&server);
        assert_eq!(client.generate("x", "llama3.1").await.unwrap(), "try ff00aa");
    }

    async fn mount_tags(server: &MockServer, names: &[&str]) {
        let models: Vec<serde_json::Value> = names
            .iter()
            .map(|name| serde_json::json!({"name": name, "size": 1}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(json_body(serde_json::json!({ "models": models })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_models() {
        let server = MockServer::start().await;
        mount_tags(&server, &["llama3.1:latest", "mistral:7b"]).await;

        let (client, _) = client_for(&server);
        let models = client.list_models().await.expect("list models");
        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["llama3.1:latest", "mistral:7b"]);
    }

    #[tokio::test]
    async fn test_list_models_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let err = client.list_models().await.unwrap_err();
        assert!(err.to_string().contains("Failed to list models"));
    }

    #[tokio::test]
    async fn test_resolve_model_installed() {
        let server = MockServer::start().await;
        mount_tags(&server, &["mistral", "LLAMA3.1"]).await;

        let (client, _) = client_for(&server);
        assert_eq!(client.resolve_model("llama3.1").await, "llama3.1");
    }

    #[tokio::test]
    async fn test_resolve_model_matches_latest_tag() {
        let server = MockServer::start().await;
        mount_tags(&server, &["mistral", "llama3.1:latest"]).await;

        let (client, _) = client_for(&server);
        assert_eq!(client.resolve_model("llama3.1").await, "llama3.1");
    }

    #[tokio::test]
    async fn test_resolve_model_substitutes_first() {
        let server = MockServer::start().await;
        mount_tags(&server, &["mistral:7b", "phi3"]).await;

        let (client, _) = client_for(&server);
        assert_eq!(client.resolve_model("llama3.1").await, "mistral:7b");
    }

    #[tokio::test]
    async fn test_resolve_model_empty_list_keeps_requested() {
        let server = MockServer::start().await;
        mount_tags(&server, &[]).await;

        let (client, _) = client_for(&server);
        assert_eq!(client.resolve_model("llama3.1").await, "llama3.1");
    }

    #[tokio::test]
    async fn test_resolve_model_fails_open() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        assert_eq!(client.resolve_model("llama3.1").await, "llama3.1");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = OllamaConfig::default();
        config.retry.max_attempts = 0;
        assert!(matches!(
            OllamaClient::new(&config),
            Err(OllamaError::InvalidConfig(_))
        ));
    }
}
