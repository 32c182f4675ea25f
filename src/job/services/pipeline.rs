//! Request, result, and failure types of the generation pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::gateway::ports::ModelGatewayError;
use crate::job::domain::{JobId, JobStatus};
use crate::job::ports::JobStoreError;
use crate::orchestration::domain::{OrchestrationRecord, PromptError};
use crate::orchestration::services::OrchestrationError;
use crate::synthesis::{SynthesisError, SynthesisStrategy};

/// Projection of a finished job returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Job identifier.
    pub app_id: JobId,
    /// Public URL, real or mock.
    pub url: String,
    /// Synthesized source.
    pub code: String,
    /// Orchestration record.
    pub orchestration: OrchestrationRecord,
    /// Ability tags in orchestration order.
    pub abilities: Vec<String>,
    /// Seconds between job creation and the `ready` update.
    pub deploy_time_seconds: f64,
    /// Whether the URL came from the mock fallback.
    pub degraded: bool,
}

/// Caller-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
    /// The prompt failed validation.
    InvalidInput,
    /// The model provider has no credentials.
    ProviderNotConfigured,
    /// Any other failure.
    InternalError,
}

impl FailureCode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::ProviderNotConfigured => "PROVIDER_NOT_CONFIGURED",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure returned by the pipeline entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{code}: {message}")]
pub struct GenerateFailure {
    /// Failure category.
    pub code: FailureCode,
    /// Human-readable description.
    pub message: String,
}

impl From<&PipelineError> for GenerateFailure {
    fn from(err: &PipelineError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Errors raised inside one pipeline run.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// The prompt failed validation.
    #[error(transparent)]
    InvalidPrompt(#[from] PromptError),

    /// Ability orchestration failed.
    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),

    /// Code synthesis failed.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// The job store failed or rejected an update.
    #[error(transparent)]
    Store(#[from] JobStoreError),
}

/// Result type for pipeline stages.
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Maps the error to its caller-facing category.
    #[must_use]
    pub const fn code(&self) -> FailureCode {
        match self {
            Self::InvalidPrompt(_) | Self::Orchestration(OrchestrationError::InvalidPrompt(_)) => {
                FailureCode::InvalidInput
            }
            Self::Orchestration(OrchestrationError::Gateway(
                ModelGatewayError::ProviderUnavailable,
            ))
            | Self::Synthesis(SynthesisError::Gateway(ModelGatewayError::ProviderUnavailable)) => {
                FailureCode::ProviderNotConfigured
            }
            _ => FailureCode::InternalError,
        }
    }
}

/// Job counts for operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatistics {
    /// Number of jobs in the store.
    pub total: usize,
    /// Number of jobs per status.
    pub by_status: BTreeMap<JobStatus, usize>,
}

/// Configuration state of the pipeline's collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Whether the model provider has an API key.
    pub model_provider_configured: bool,
    /// Whether the deployment provider has a token.
    pub deployment_provider_configured: bool,
    /// Default synthesis strategy.
    pub synthesis_strategy: SynthesisStrategy,
}
