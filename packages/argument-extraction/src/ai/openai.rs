//! OpenAI-compatible implementation of the engine trait.
//!
//! Works against any `/chat/completions` server: OpenAI itself, a local
//! Ollama instance, OpenRouter and the like.
//!
//! # Example
//!
//! ```rust,ignore
//! use argument_extraction::{ai::OpenAICompatEngine, Orchestrator};
//!
//! let engine = OpenAICompatEngine::from_env()?;
//! let orchestrator = Orchestrator::new(engine, "llama3.1");
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};

use crate::error::{ExtractionError, Result};
use crate::traits::engine::{CompletionRequest, GenerativeEngine};

/// Engine backed by [`OpenAIClient`].
#[derive(Clone)]
pub struct OpenAICompatEngine {
    client: OpenAIClient,
}

impl OpenAICompatEngine {
    /// Wrap an existing client.
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    /// Create from `OPENAI_BASE_URL` / `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        OpenAIClient::from_env()
            .map(Self::new)
            .map_err(ExtractionError::engine)
    }

    /// Get the underlying client.
    pub fn client(&self) -> &OpenAIClient {
        &self.client
    }
}

#[async_trait]
impl GenerativeEngine for OpenAICompatEngine {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let chat = ChatRequest::new(request.model)
            .message(Message::user(request.prompt))
            .temperature(request.temperature)
            .max_tokens(request.max_tokens)
            .timeout(request.timeout);

        match self.client.chat_completion(chat).await {
            Ok(response) => Ok(response.content),
            Err(OpenAIError::Timeout(_)) => Err(ExtractionError::Timeout {
                after: request.timeout,
            }),
            Err(e) => Err(ExtractionError::engine(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_engine<T: GenerativeEngine + Clone>() {}
        assert_engine::<OpenAICompatEngine>();
    }

    #[tokio::test]
    async fn test_unreachable_server_is_engine_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let engine = OpenAICompatEngine::new(OpenAIClient::new(format!("http://{}", addr)));
        let err = engine
            .complete(CompletionRequest {
                model: "llama3.1".into(),
                prompt: "hi".into(),
                temperature: 0.1,
                max_tokens: 10,
                timeout: std::time::Duration::from_secs(5),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractionError::Engine(_)));
    }
}
