//! Deployment with graceful degradation to a mock result.

use mockable::Clock;
use std::sync::Arc;

use crate::deployment::domain::{
    BuildSpec, Degraded, DegradedReason, Deployment, DeploymentState, DeploymentStatus,
};
use crate::deployment::ports::DeploymentProvider;

/// Host suffix of mock deployment URLs.
pub const MOCK_HOST_SUFFIX: &str = "vercel.app";

/// Publishes build specs, falling back to a mock deployment when the
/// provider is unconfigured or fails.
///
/// The mock URL is `https://{name}-{millis}.vercel.app`, so it depends
/// only on the app name and the clock.
#[derive(Debug)]
pub struct DeploymentAdapter<P, C>
where
    P: DeploymentProvider + ?Sized,
    C: Clock + Send + Sync,
{
    provider: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> DeploymentAdapter<P, C>
where
    P: DeploymentProvider + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates an adapter over `provider`.
    #[must_use]
    pub const fn new(provider: Arc<P>, clock: Arc<C>) -> Self {
        Self { provider, clock }
    }

    /// Returns whether the provider has credentials.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Deploys `spec`, keeping the distinction between a real deployment
    /// and a mock fallback.
    ///
    /// # Errors
    ///
    /// Returns [`Degraded`] carrying a mock deployment when the provider is
    /// unconfigured or fails. No network call is made when unconfigured.
    pub async fn attempt(&self, spec: &BuildSpec) -> Result<Deployment, Degraded> {
        if !self.provider.is_configured() {
            let deployment = self.mock_deployment(spec);
            tracing::warn!(
                name = spec.name(),
                url = deployment.url(),
                "deployment provider not configured, using mock deployment"
            );
            return Err(Degraded::new(deployment, DegradedReason::Unconfigured));
        }

        match self.provider.create_deployment(spec).await {
            Ok(deployment) => {
                tracing::info!(
                    name = spec.name(),
                    deploy_id = deployment.deploy_id(),
                    url = deployment.url(),
                    "deployment created"
                );
                Ok(deployment)
            }
            Err(err) => {
                let deployment = self.mock_deployment(spec);
                tracing::warn!(
                    name = spec.name(),
                    error = %err,
                    url = deployment.url(),
                    "deployment failed, falling back to mock deployment"
                );
                Err(Degraded::new(
                    deployment,
                    DegradedReason::ProviderFailed(err.to_string()),
                ))
            }
        }
    }

    /// Deploys `spec` and always returns a usable deployment.
    pub async fn deploy(&self, spec: &BuildSpec) -> Deployment {
        self.attempt(spec)
            .await
            .unwrap_or_else(Degraded::into_deployment)
    }

    /// Builds the mock deployment for `spec` at the current time.
    #[must_use]
    pub fn mock_deployment(&self, spec: &BuildSpec) -> Deployment {
        let deploy_id = self.clock.utc().timestamp_millis().to_string();
        Deployment::new(
            format!("https://{}-{deploy_id}.{MOCK_HOST_SUFFIX}", spec.name()),
            deploy_id,
            [format!("{}.{MOCK_HOST_SUFFIX}", spec.name())],
        )
    }

    /// Reports the state of a deployment.
    ///
    /// Without credentials every deployment is ready at
    /// `https://mock-{id}.vercel.app`. A failed lookup reports
    /// [`DeploymentState::Error`] without a URL.
    pub async fn status(&self, deploy_id: &str) -> DeploymentStatus {
        if !self.provider.is_configured() {
            return DeploymentStatus::new(
                DeploymentState::Ready,
                Some(format!("https://mock-{deploy_id}.{MOCK_HOST_SUFFIX}")),
            );
        }
        match self.provider.deployment_status(deploy_id).await {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(deploy_id, error = %err, "deployment status lookup failed");
                DeploymentStatus::new(DeploymentState::Error, None)
            }
        }
    }
}
