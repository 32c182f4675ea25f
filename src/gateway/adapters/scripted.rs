//! Scripted gateway replaying canned replies, for offline runs and tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::gateway::ports::{ChatOptions, ModelGateway, ModelGatewayError, ModelGatewayResult};

/// One exchange observed by a [`ScriptedModelGateway`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedExchange {
    /// System instruction sent.
    pub system_prompt: String,
    /// User message sent.
    pub user_message: String,
    /// Sampling options sent.
    pub options: ChatOptions,
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: VecDeque<ModelGatewayResult<String>>,
    exchanges: Vec<RecordedExchange>,
}

/// Thread-safe gateway that answers from a queue of scripted results.
///
/// An exhausted script answers with
/// [`ModelGatewayError::ProviderEmptyResponse`].
#[derive(Debug, Clone)]
pub struct ScriptedModelGateway {
    configured: bool,
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedModelGateway {
    /// Creates a configured gateway with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self {
            configured: true,
            state: Arc::default(),
        }
    }

    /// Creates a gateway that behaves as if no API key were set.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            state: Arc::default(),
        }
    }

    /// Appends a successful reply to the script.
    #[must_use]
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.push(Ok(reply.into()));
        self
    }

    /// Appends a failure to the script.
    #[must_use]
    pub fn with_failure(self, error: ModelGatewayError) -> Self {
        self.push(Err(error));
        self
    }

    /// Returns every exchange sent so far.
    #[must_use]
    pub fn exchanges(&self) -> Vec<RecordedExchange> {
        self.state
            .lock()
            .map(|state| state.exchanges.clone())
            .unwrap_or_default()
    }

    fn push(&self, reply: ModelGatewayResult<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.replies.push_back(reply);
        }
    }
}

impl Default for ScriptedModelGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelGateway for ScriptedModelGateway {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(
        &self,
        system_prompt: &str,
        user_message: &str,
        options: ChatOptions,
    ) -> ModelGatewayResult<String> {
        if !self.configured {
            return Err(ModelGatewayError::ProviderUnavailable);
        }

        let mut state = self.state.lock().map_err(|err| {
            ModelGatewayError::transport(std::io::Error::other(err.to_string()))
        })?;
        state.exchanges.push(RecordedExchange {
            system_prompt: system_prompt.to_owned(),
            user_message: user_message.to_owned(),
            options,
        });
        state
            .replies
            .pop_front()
            .unwrap_or(Err(ModelGatewayError::ProviderEmptyResponse))
    }
}
