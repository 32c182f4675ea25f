//! Deployment provider port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::deployment::domain::{BuildSpec, Deployment, DeploymentStatus};

/// Result type for deployment provider operations.
pub type DeploymentProviderResult<T> = Result<T, DeploymentProviderError>;

/// Hosting provider that builds and serves a [`BuildSpec`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeploymentProvider: Send + Sync {
    /// Returns whether credentials are present.
    fn is_configured(&self) -> bool;

    /// Creates a deployment from `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentProviderError`] when the provider rejects the
    /// request or cannot be reached.
    async fn create_deployment(&self, spec: &BuildSpec) -> DeploymentProviderResult<Deployment>;

    /// Looks up the state of a deployment.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentProviderError`] when the provider rejects the
    /// request or cannot be reached.
    async fn deployment_status(&self, deploy_id: &str)
    -> DeploymentProviderResult<DeploymentStatus>;
}

/// Errors returned by deployment provider adapters.
#[derive(Debug, Clone, Error)]
pub enum DeploymentProviderError {
    /// No token is configured.
    #[error("deployment provider is not configured: missing token")]
    Unconfigured,

    /// The provider answered with a non-success status.
    #[error("deployment provider rejected the request (status {status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("invalid deployment provider response: {0}")]
    InvalidResponse(String),

    /// The request could not be delivered.
    #[error("deployment provider transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeploymentProviderError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
