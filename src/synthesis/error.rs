//! Error types for code synthesis.

use thiserror::Error;

use crate::gateway::ports::ModelGatewayError;

/// Result type for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Errors returned while synthesizing application source.
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    /// A template failed to load or render.
    #[error("failed to render template '{template}': {reason}")]
    Template {
        /// Template name.
        template: String,
        /// Renderer diagnostic.
        reason: String,
    },

    /// The model gateway failed during model-assisted synthesis.
    #[error(transparent)]
    Gateway(#[from] ModelGatewayError),

    /// The record could not be serialized for the model.
    #[error("failed to serialize orchestration record: {0}")]
    InvalidRecord(String),

    /// The model reply contained no source code.
    #[error("model returned no source code")]
    EmptySource,
}

impl SynthesisError {
    pub(crate) fn template(template: &str, err: &minijinja::Error) -> Self {
        Self::Template {
            template: template.to_owned(),
            reason: err.to_string(),
        }
    }
}
