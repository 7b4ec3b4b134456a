//! Minimal OpenAI-compatible chat completion client
//!
//! Speaks the `/chat/completions` protocol shared by OpenAI, Ollama,
//! OpenRouter and most local inference servers. No domain logic lives here.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{ChatRequest, Message, OpenAIClient};
//!
//! // Local Ollama server, no key required
//! let client = OpenAIClient::new("http://localhost:11434/v1");
//!
//! let response = client
//!     .chat_completion(
//!         ChatRequest::new("llama3.1")
//!             .message(Message::user("Hello!"))
//!             .temperature(0.2)
//!             .timeout(Duration::from_secs(30)),
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Default endpoint: a local Ollama server's OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Chat completion client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAIClient {
    /// Create a client for the given base URL (e.g. `https://api.openai.com/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: None,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from `OPENAI_BASE_URL` (default: local Ollama) and the
    /// optional `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(OpenAIError::Config(format!(
                "OPENAI_BASE_URL must be an http(s) URL, got {base_url:?}"
            )));
        }

        let client = Self::new(base_url);
        Ok(match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => client.with_api_key(key),
            _ => client,
        })
    }

    /// Send a bearer token with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Chat completion.
    ///
    /// Returns the text of `choices[0].message.content`. Transport failures,
    /// deadline expiry, non-2xx statuses and responses of any other shape
    /// each map to their own [`OpenAIError`] variant.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let mut builder = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, model = %request.model, "Chat completion request failed");
            classify_transport_error(e, &request)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %body, "Chat completion API error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| classify_transport_error(e, &request))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| OpenAIError::Parse("response has no choices".into()))?
            .message
            .content
            .ok_or_else(|| OpenAIError::Parse("choice has no message content".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            reply_len = content.len(),
            "Chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: raw.usage,
        })
    }
}

fn classify_transport_error(e: reqwest::Error, request: &ChatRequest) -> OpenAIError {
    if e.is_timeout() {
        OpenAIError::Timeout(request.timeout.unwrap_or_default())
    } else if e.is_decode() {
        OpenAIError::Parse(e.to_string())
    } else {
        OpenAIError::Network(e.to_string())
    }
}
