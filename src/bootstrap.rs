//! Wires configured adapters into a ready-to-run pipeline.

use mockable::DefaultClock;
use std::sync::Arc;

use crate::config::FactoriaConfig;
use crate::deployment::adapters::VercelDeploymentProvider;
use crate::gateway::adapters::ChatCompletionsGateway;
use crate::job::adapters::InMemoryJobStore;
use crate::job::services::JobLifecycleService;

/// Pipeline backed by the HTTP adapters, the in-memory store, and the
/// system clock.
pub type ConfiguredPipeline = JobLifecycleService<
    InMemoryJobStore,
    ChatCompletionsGateway,
    VercelDeploymentProvider,
    DefaultClock,
>;

/// Builds a pipeline with a fresh job store.
#[must_use]
pub fn build_pipeline(config: FactoriaConfig) -> ConfiguredPipeline {
    build_pipeline_with_store(config, Arc::new(InMemoryJobStore::new()))
}

/// Builds a pipeline sharing `store` with other components.
#[must_use]
pub fn build_pipeline_with_store(
    config: FactoriaConfig,
    store: Arc<InMemoryJobStore>,
) -> ConfiguredPipeline {
    let FactoriaConfig {
        model,
        deployment,
        synthesis,
    } = config;
    tracing::debug!(
        model = %model.model,
        model_configured = model.api_key.is_some(),
        deployment_configured = deployment.token.is_some(),
        synthesis = %synthesis,
        "building generation pipeline"
    );
    JobLifecycleService::new(
        store,
        Arc::new(ChatCompletionsGateway::new(model)),
        Arc::new(VercelDeploymentProvider::new(deployment)),
        Arc::new(DefaultClock),
        synthesis,
    )
}
