//! Shared world state for generation pipeline BDD scenarios.

use std::sync::Arc;

use factoria::config::DeploymentProviderConfig;
use factoria::deployment::adapters::VercelDeploymentProvider;
use factoria::gateway::adapters::ScriptedModelGateway;
use factoria::job::adapters::InMemoryJobStore;
use factoria::job::domain::{Job, JobId};
use factoria::job::ports::JobStore;
use factoria::job::services::{GenerateFailure, GenerationResult, JobLifecycleService};
use factoria::synthesis::SynthesisStrategy;
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestPipeline = JobLifecycleService<
    InMemoryJobStore,
    ScriptedModelGateway,
    VercelDeploymentProvider,
    DefaultClock,
>;

/// Scenario world for pipeline behaviour tests.
pub struct PipelineWorld {
    pub gateway: ScriptedModelGateway,
    pub store: Arc<InMemoryJobStore>,
    pub last_result: Option<Result<GenerationResult, GenerateFailure>>,
    pub last_job: Option<Job>,
}

impl PipelineWorld {
    /// Creates a world with a configured but unscripted model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gateway: ScriptedModelGateway::new(),
            store: Arc::new(InMemoryJobStore::new()),
            last_result: None,
            last_job: None,
        }
    }

    /// Builds a pipeline over the world's gateway and store. Deployment
    /// always takes the mock path.
    #[must_use]
    pub fn pipeline(&self) -> TestPipeline {
        JobLifecycleService::new(
            Arc::clone(&self.store),
            Arc::new(self.gateway.clone()),
            Arc::new(VercelDeploymentProvider::new(DeploymentProviderConfig::new(
                None,
            ))),
            Arc::new(DefaultClock),
            SynthesisStrategy::Template,
        )
    }

    /// Reads a job back from the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup fails or the job is missing.
    pub async fn store_job(&self, id: JobId) -> Result<Job, eyre::Report> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| eyre::eyre!("job {id} missing from store"))
    }

    /// Returns the successful result of the last generation.
    ///
    /// # Errors
    ///
    /// Returns an error when no generation ran or it failed.
    pub fn generated(&self) -> Result<&GenerationResult, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(result)) => Ok(result),
            Some(Err(failure)) => Err(eyre::eyre!("generation failed: {failure}")),
            None => Err(eyre::eyre!("no generation has run in this scenario")),
        }
    }
}

impl Default for PipelineWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PipelineWorld {
    PipelineWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
