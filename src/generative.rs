//! # Generative Text Module
//!
//! ## Purpose
//! The generative-text collaborator used to draft case summaries and
//! actionable reports. The service is modeled as an injected capability with
//! an explicit unavailable state: extractors ask for a completion and receive
//! either text or nothing, never an error to propagate.
//!
//! ## Input/Output Specification
//! - **Input**: Prompt text plus model, token budget, and temperature
//! - **Output**: Free-form completion text, or `None` on any degradation
//! - **Degradation**: Unconfigured service, network failure, non-success
//!   status, and timeout are all equivalent "unavailable" conditions
//!
//! The concrete backend speaks the Anthropic messages API over `reqwest`;
//! tests substitute deterministic [`TextGenerator`] fakes.

use crate::config::GenerativeConfig;
use crate::errors::{AssistError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// One completion request to the generative service
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A service that turns a prompt into free-form text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// The process-wide generative capability, explicit about unavailability
#[derive(Clone)]
pub enum Generative {
    Enabled(Arc<dyn TextGenerator>),
    Unavailable,
}

impl Generative {
    /// Build the capability from configuration. A missing API key or a
    /// client construction failure yields `Unavailable`, never an error.
    pub fn from_config(config: &GenerativeConfig) -> Self {
        let Some(api_key) = config.api_key.clone() else {
            tracing::warn!("Generative API key not configured, falling back to template content");
            return Generative::Unavailable;
        };

        match AnthropicGenerator::new(
            config.api_url.clone(),
            api_key,
            config.api_version.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        ) {
            Ok(generator) => {
                tracing::info!("Generative client initialized for {}", config.api_url);
                Generative::Enabled(Arc::new(generator))
            }
            Err(e) => {
                tracing::error!("Failed to initialize generative client: {}", e);
                Generative::Unavailable
            }
        }
    }

    /// Wrap an arbitrary generator; used by tests with deterministic fakes.
    pub fn enabled(generator: Arc<dyn TextGenerator>) -> Self {
        Generative::Enabled(generator)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Generative::Enabled(_))
    }

    /// Run a completion, absorbing every failure mode into `None`.
    pub async fn try_complete(&self, request: CompletionRequest) -> Option<String> {
        match self {
            Generative::Unavailable => {
                tracing::debug!("Generative service unavailable, using fallback");
                None
            }
            Generative::Enabled(generator) => match generator.complete(request).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(category = e.category(), "Generative call failed: {}", e);
                    None
                }
            },
        }
    }
}

/// Anthropic messages API client
pub struct AnthropicGenerator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    api_version: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl AnthropicGenerator {
    pub fn new(
        api_url: String,
        api_key: String,
        api_version: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssistError::GenerativeUnavailable {
                reason: format!("HTTP client construction failed: {}", e),
            })?;

        Ok(Self {
            client,
            api_url,
            api_key,
            api_version,
        })
    }
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let url = format!("{}/v1/messages", self.api_url.trim_end_matches('/'));
        let body = MessagesRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AssistError::GenerativeCallFailed {
                details: format!("status {}: {}", status, detail),
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        let text = parsed
            .content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.clone())
            .ok_or_else(|| AssistError::GenerativeCallFailed {
                details: "response contained no text block".to_string(),
            })?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> CompletionRequest {
        CompletionRequest {
            prompt: "summarize Terry v. Ohio".to_string(),
            model: "claude-3-5-haiku-20241022".to_string(),
            max_tokens: 100,
            temperature: 0.3,
        }
    }

    #[tokio::test]
    async fn unavailable_capability_yields_none() {
        let generative = Generative::Unavailable;
        assert!(!generative.is_available());
        assert!(generative.try_complete(request()).await.is_none());
    }

    #[tokio::test]
    async fn client_parses_messages_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "1. Summary line\n2. Takeaways\n- point"}]
            })))
            .mount(&server)
            .await;

        let generator = AnthropicGenerator::new(
            server.uri(),
            "test-key".to_string(),
            "2023-06-01".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        let text = generator.complete(request()).await.unwrap();
        assert!(text.starts_with("1. Summary line"));
    }

    #[tokio::test]
    async fn server_error_becomes_none_through_capability() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let generator = AnthropicGenerator::new(
            server.uri(),
            "test-key".to_string(),
            "2023-06-01".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        let generative = Generative::enabled(Arc::new(generator));
        assert!(generative.try_complete(request()).await.is_none());
    }
}
