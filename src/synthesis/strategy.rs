//! Synthesis strategy selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::orchestration::domain::AppKind;

/// How source code is produced from an orchestration record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisStrategy {
    /// Render a fixed template for the record's kind.
    #[default]
    Template,
    /// Ask the model to complete the rendered template.
    ModelAssisted,
}

impl SynthesisStrategy {
    /// Returns the configuration spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::ModelAssisted => "model",
        }
    }
}

impl fmt::Display for SynthesisStrategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned for an unknown strategy name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown synthesis strategy '{0}', expected 'template' or 'model'")]
pub struct ParseSynthesisStrategyError(pub String);

impl TryFrom<&str> for SynthesisStrategy {
    type Error = ParseSynthesisStrategyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "model" | "model-assisted" | "model_assisted" => Ok(Self::ModelAssisted),
            _ => Err(ParseSynthesisStrategyError(value.to_owned())),
        }
    }
}

/// Per-request synthesis overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisOptions {
    /// Strategy to use instead of the configured one.
    pub strategy: Option<SynthesisStrategy>,
    /// Kind used when the record does not classify one.
    pub preferred_kind: Option<AppKind>,
}

impl SynthesisOptions {
    /// Sets the strategy override.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SynthesisStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the preferred kind.
    #[must_use]
    pub const fn with_preferred_kind(mut self, kind: AppKind) -> Self {
        self.preferred_kind = Some(kind);
        self
    }
}
