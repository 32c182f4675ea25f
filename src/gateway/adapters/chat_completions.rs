//! HTTP adapter for OpenAI-style chat-completions endpoints.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::ModelProviderConfig;
use crate::gateway::ports::{ChatOptions, ModelGateway, ModelGatewayError, ModelGatewayResult};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions gateway authenticating with a bearer token.
///
/// No request timeout is applied; a hanging provider blocks the caller.
#[derive(Debug)]
pub struct ChatCompletionsGateway {
    http: Client,
    api_key: Option<SecretString>,
    endpoint: String,
    model: String,
}

impl ChatCompletionsGateway {
    /// Creates a gateway from provider settings.
    #[must_use]
    pub fn new(config: ModelProviderConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a gateway with a caller-supplied HTTP client.
    #[must_use]
    pub fn with_client(http: Client, config: ModelProviderConfig) -> Self {
        let endpoint = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        Self {
            http,
            api_key: config.api_key,
            endpoint,
            model: config.model,
        }
    }
}

#[async_trait]
impl ModelGateway for ChatCompletionsGateway {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(
        &self,
        system_prompt: &str,
        user_message: &str,
        options: ChatOptions,
    ) -> ModelGatewayResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ModelGatewayError::ProviderUnavailable)?;

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_p: options.top_p,
        };

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "sending chat request");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(ModelGatewayError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(no body)".to_owned());
            return Err(ModelGatewayError::ProviderError {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|err| ModelGatewayError::InvalidResponse(err.to_string()))?;

        decoded
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ModelGatewayError::ProviderEmptyResponse)
    }
}
