//! Deployment outcomes and status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A published deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    url: String,
    deploy_id: String,
    #[serde(default)]
    aliases: Vec<String>,
}

impl Deployment {
    /// Creates a deployment result.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        deploy_id: impl Into<String>,
        aliases: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            url: url.into(),
            deploy_id: deploy_id.into(),
            aliases: aliases.into_iter().collect(),
        }
    }

    /// Returns the public URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the provider deployment identifier.
    #[must_use]
    pub fn deploy_id(&self) -> &str {
        &self.deploy_id
    }

    /// Returns additional hostnames.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// Why a deployment fell back to the mock path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    /// No provider credentials are configured.
    Unconfigured,
    /// The provider call failed.
    ProviderFailed(String),
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured => formatter.write_str("deployment provider is not configured"),
            Self::ProviderFailed(reason) => write!(formatter, "deployment provider failed: {reason}"),
        }
    }
}

/// A mock deployment standing in for a real one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degraded {
    deployment: Deployment,
    reason: DegradedReason,
}

impl Degraded {
    /// Pairs a mock deployment with the reason it was used.
    #[must_use]
    pub const fn new(deployment: Deployment, reason: DegradedReason) -> Self {
        Self { deployment, reason }
    }

    /// Returns the mock deployment.
    #[must_use]
    pub const fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Returns the fallback reason.
    #[must_use]
    pub const fn reason(&self) -> &DegradedReason {
        &self.reason
    }

    /// Consumes the outcome, keeping the mock deployment.
    #[must_use]
    pub fn into_deployment(self) -> Deployment {
        self.deployment
    }
}

/// Build state reported by a deployment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentState {
    /// Waiting for a builder.
    Queued,
    /// Build in progress.
    Building,
    /// Serving traffic.
    Ready,
    /// Failed or cancelled.
    Error,
}

impl DeploymentState {
    /// Maps a provider state name, treating unknown names as errors.
    #[must_use]
    pub fn from_provider(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "QUEUED" | "INITIALIZING" => Self::Queued,
            "BUILDING" => Self::Building,
            "READY" => Self::Ready,
            _ => Self::Error,
        }
    }
}

/// Answer to a deployment status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    /// Current build state.
    pub state: DeploymentState,
    /// Public URL when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl DeploymentStatus {
    /// Creates a status.
    #[must_use]
    pub const fn new(state: DeploymentState, url: Option<String>) -> Self {
        Self { state, url }
    }
}
