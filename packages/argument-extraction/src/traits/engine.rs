//! Generative engine trait.
//!
//! Both the policy oracle and the extraction calls go through this seam, so
//! tests can script replies without any network access.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// A single prompt sent to a generative text engine.
///
/// The prompt travels as one user-role message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier understood by the engine
    pub model: String,

    /// Fully rendered prompt
    pub prompt: String,

    /// Sampling temperature in `[0, 1]`
    pub temperature: f32,

    /// Output token budget
    pub max_tokens: u32,

    /// Per-call deadline
    pub timeout: Duration,
}

/// Generative text engine.
///
/// Implementations return the assistant's reply text or an error; they
/// never need to retry, since every failure is absorbed by the caller.
#[async_trait]
pub trait GenerativeEngine: Send + Sync {
    /// Send one prompt and return the reply text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

#[async_trait]
impl<E: GenerativeEngine + ?Sized> GenerativeEngine for std::sync::Arc<E> {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        (**self).complete(request).await
    }
}

#[async_trait]
impl<E: GenerativeEngine + ?Sized> GenerativeEngine for &E {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        (**self).complete(request).await
    }
}
