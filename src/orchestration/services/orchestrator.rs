//! Ability orchestration service.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::keywords::enforce_mandatory_abilities;
use super::prompts::{ORCHESTRATION_OPTIONS, system_prompt, user_message};
use crate::extraction::{ExtractionError, RequiredFields, ResponseExtractor};
use crate::gateway::ports::{ModelGateway, ModelGatewayError};
use crate::orchestration::domain::{
    AppKind, FieldSpec, FieldType, OrchestrationRecord, Prompt, PromptError,
};

/// Errors returned by [`AbilityOrchestrator`].
#[derive(Debug, Clone, Error)]
pub enum OrchestrationError {
    /// The prompt failed validation; no model call was made.
    #[error(transparent)]
    InvalidPrompt(#[from] PromptError),

    /// The model gateway failed.
    #[error(transparent)]
    Gateway(#[from] ModelGatewayError),

    /// The model reply could not be turned into a record.
    #[error("ability orchestration failed: {0}")]
    OrchestrationFailed(#[from] ExtractionError),
}

/// Result type for orchestration operations.
pub type OrchestrationResult<T> = Result<T, OrchestrationError>;

/// Model reply. Only `intent` and `abilities` are checked strictly; every
/// other member is optional and ignored when it has an unexpected shape.
#[derive(Debug, Deserialize)]
struct OrchestrationReply {
    intent: String,
    abilities: Vec<String>,
    confidence: f64,
    #[serde(default)]
    app_name: Value,
    #[serde(default, rename = "appName")]
    app_name_camel: Value,
    #[serde(default)]
    name: Value,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    orchestration: Value,
    #[serde(default, rename = "type")]
    kind: Value,
    #[serde(default)]
    fields: Value,
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_u64().is_some_and(|n| n > 0),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "required"
        ),
        _ => false,
    }
}

fn field_from_value(value: &Value) -> Option<FieldSpec> {
    match value {
        Value::String(name) if !name.trim().is_empty() => {
            Some(FieldSpec::new(name.trim(), FieldType::Text, false))
        }
        Value::Object(members) => {
            let name = members
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())?;
            let field_type = members
                .get("type")
                .and_then(Value::as_str)
                .and_then(|tag| FieldType::try_from(tag).ok())
                .unwrap_or_default();
            let required = members.get("required").is_some_and(is_truthy);
            Some(FieldSpec::new(name, field_type, required))
        }
        _ => None,
    }
}

fn parse_fields(value: &Value) -> Vec<FieldSpec> {
    let Some(entries) = value.as_array() else {
        if !value.is_null() {
            tracing::debug!(fields = %value, "ignoring non-list fields member");
        }
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let field = field_from_value(entry);
            if field.is_none() {
                tracing::debug!(field = %entry, "ignoring unrecognised field entry");
            }
            field
        })
        .collect()
}

impl OrchestrationReply {
    fn into_record(self) -> OrchestrationRecord {
        let app_name = [self.app_name, self.app_name_camel, self.name]
            .into_iter()
            .find_map(text)
            .unwrap_or_else(|| OrchestrationRecord::DEFAULT_APP_NAME.to_owned());
        let description = text(self.description)
            .or_else(|| text(self.orchestration))
            .unwrap_or_default();
        let fields = parse_fields(&self.fields);

        let mut record =
            OrchestrationRecord::new(self.intent, app_name, self.abilities, self.confidence)
                .with_description(description)
                .with_fields(fields);
        match self.kind.as_str().map(AppKind::try_from) {
            Some(Ok(kind)) => record = record.with_kind(kind),
            Some(Err(err)) => tracing::debug!(error = %err, "ignoring unknown application kind"),
            None if !self.kind.is_null() => {
                tracing::debug!(kind = %self.kind, "ignoring non-text application kind");
            }
            None => {}
        }
        record
    }
}

/// Turns prompts into ordered ability lists through a language model.
///
/// Abilities named explicitly in the prompt are always present in the
/// result, whatever the model answered.
#[derive(Debug)]
pub struct AbilityOrchestrator<G>
where
    G: ModelGateway + ?Sized,
{
    gateway: Arc<G>,
    extractor: ResponseExtractor,
}

impl<G> AbilityOrchestrator<G>
where
    G: ModelGateway + ?Sized,
{
    /// Creates an orchestrator over `gateway`.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            extractor: ResponseExtractor::new(),
        }
    }

    /// Returns whether the underlying gateway has credentials.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.gateway.is_configured()
    }

    /// Validates `prompt` and orchestrates it.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::InvalidPrompt`] before any model call
    /// when the prompt is empty or longer than 500 characters, and the
    /// errors of [`Self::orchestrate_prompt`] otherwise.
    pub async fn orchestrate(&self, prompt: &str) -> OrchestrationResult<OrchestrationRecord> {
        let validated = Prompt::new(prompt)?;
        self.orchestrate_prompt(&validated).await
    }

    /// Orchestrates an already validated prompt.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::Gateway`] when the model call fails and
    /// [`OrchestrationError::OrchestrationFailed`] when the reply is
    /// malformed or lacks `intent` or `abilities`.
    pub async fn orchestrate_prompt(
        &self,
        prompt: &Prompt,
    ) -> OrchestrationResult<OrchestrationRecord> {
        let raw = self
            .gateway
            .send(&system_prompt(), &user_message(prompt), ORCHESTRATION_OPTIONS)
            .await?;
        let reply: OrchestrationReply = self
            .extractor
            .extract(&raw, RequiredFields::ORCHESTRATION)?;

        let mut record = reply.into_record();
        let added = enforce_mandatory_abilities(prompt.as_str(), &mut record);
        if !added.is_empty() {
            tracing::debug!(
                added = ?added,
                abilities = ?record.abilities(),
                "appended abilities named in the prompt"
            );
        }
        Ok(record)
    }
}
