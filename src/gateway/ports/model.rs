//! Model gateway port and sampling options.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for model gateway operations.
pub type ModelGatewayResult<T> = Result<T, ModelGatewayError>;

/// Sampling parameters for one chat exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatOptions {
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
}

impl ChatOptions {
    /// Creates options with the default nucleus threshold.
    #[must_use]
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            top_p: 0.9,
        }
    }

    /// Overrides the nucleus sampling threshold.
    #[must_use]
    pub const fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self::new(0.7, 2000)
    }
}

/// Chat contract with a language-model provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Returns whether credentials are present.
    fn is_configured(&self) -> bool;

    /// Sends a system instruction and a user message, returning the first
    /// reply verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ModelGatewayError::ProviderUnavailable`] without any network
    /// call when credentials are absent, [`ModelGatewayError::ProviderError`]
    /// on a non-success status, and
    /// [`ModelGatewayError::ProviderEmptyResponse`] when the reply carries no
    /// choices.
    async fn send(
        &self,
        system_prompt: &str,
        user_message: &str,
        options: ChatOptions,
    ) -> ModelGatewayResult<String>;
}

/// Errors returned by model gateway adapters.
#[derive(Debug, Clone, Error)]
pub enum ModelGatewayError {
    /// No API key is configured.
    #[error("model provider is not configured: missing API key")]
    ProviderUnavailable,

    /// The provider answered with a non-success status.
    #[error("model provider error (status {status}): {body}")]
    ProviderError {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the provider.
        body: String,
    },

    /// The provider answered successfully but without any choice.
    #[error("model provider returned no choices")]
    ProviderEmptyResponse,

    /// The response body could not be decoded.
    #[error("invalid model provider response: {0}")]
    InvalidResponse(String),

    /// The request could not be delivered.
    #[error("model provider transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ModelGatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
