//! Job lifecycle manager: runs the generation pipeline for one job and
//! answers job queries.

use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::pipeline::{
    GenerateFailure, GenerationResult, HealthReport, JobStatistics, PipelineError, PipelineResult,
};
use crate::deployment::domain::{BuildSpec, DeploymentStatus};
use crate::deployment::ports::DeploymentProvider;
use crate::deployment::services::DeploymentAdapter;
use crate::gateway::ports::ModelGateway;
use crate::job::domain::{Job, JobId, JobStatus, StatusUpdate, UserId};
use crate::job::ports::{JobStore, JobStoreResult};
use crate::orchestration::domain::Prompt;
use crate::orchestration::services::AbilityOrchestrator;
use crate::synthesis::{CodeSynthesizer, SynthesisOptions, SynthesisStrategy};

/// Input to [`JobLifecycleService::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    prompt: String,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    options: SynthesisOptions,
}

impl GenerateRequest {
    /// Creates a request for `prompt` without a user or options.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            user_id: None,
            options: SynthesisOptions::default(),
        }
    }

    /// Attributes the job to a user.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets per-request synthesis options.
    #[must_use]
    pub const fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the raw prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the raw user identifier.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns the synthesis options.
    #[must_use]
    pub const fn options(&self) -> SynthesisOptions {
        self.options
    }
}

/// Drives jobs through `generating -> deploying -> ready`, persisting each
/// stage's output before the next stage starts.
///
/// Stages of one job run sequentially. Independent jobs may run
/// concurrently on a shared service.
pub struct JobLifecycleService<S, G, P, C>
where
    S: JobStore + ?Sized,
    G: ModelGateway + ?Sized,
    P: DeploymentProvider + ?Sized,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    orchestrator: AbilityOrchestrator<G>,
    synthesizer: CodeSynthesizer<G>,
    deployer: DeploymentAdapter<P, C>,
    clock: Arc<C>,
}

impl<S, G, P, C> JobLifecycleService<S, G, P, C>
where
    S: JobStore + ?Sized,
    G: ModelGateway + ?Sized,
    P: DeploymentProvider + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service. `gateway` serves both orchestration and
    /// model-assisted synthesis.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        gateway: Arc<G>,
        provider: Arc<P>,
        clock: Arc<C>,
        strategy: SynthesisStrategy,
    ) -> Self {
        Self {
            store,
            orchestrator: AbilityOrchestrator::new(Arc::clone(&gateway)),
            synthesizer: CodeSynthesizer::new(gateway, strategy),
            deployer: DeploymentAdapter::new(provider, Arc::clone(&clock)),
            clock,
        }
    }

    /// Runs the full pipeline for one prompt.
    ///
    /// The prompt is validated before any job is created or any model call
    /// is made. Once the job exists, a failing stage marks it `failed`.
    /// Deployment failures never fail the job; they yield a mock URL and
    /// set [`GenerationResult::degraded`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerateFailure`] with `INVALID_INPUT` for a bad prompt,
    /// `PROVIDER_NOT_CONFIGURED` when the model provider has no API key,
    /// and `INTERNAL_ERROR` otherwise.
    pub async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerationResult, GenerateFailure> {
        let GenerateRequest {
            prompt,
            user_id,
            options,
        } = request;
        let validated = Prompt::new(prompt)
            .map_err(|err| Self::report(None, &PipelineError::from(err)))?;
        let owner = user_id.and_then(|raw| UserId::new(raw).ok());

        let job = self
            .store
            .create(Job::new(validated, owner, &*self.clock))
            .await
            .map_err(|err| Self::report(None, &PipelineError::from(err)))?;
        tracing::info!(job_id = %job.id(), status = %job.status(), "job created");

        match self.run_stages(&job, options).await {
            Ok(result) => Ok(result),
            Err(err) => {
                self.mark_failed(job.id(), &err).await;
                Err(Self::report(Some(job.id()), &err))
            }
        }
    }

    async fn run_stages(
        &self,
        job: &Job,
        options: SynthesisOptions,
    ) -> PipelineResult<GenerationResult> {
        let job_id = job.id();

        let record = self.orchestrator.orchestrate_prompt(job.prompt()).await?;
        self.store
            .update_status(
                job_id,
                StatusUpdate::new(JobStatus::Generating, &*self.clock)
                    .with_orchestration(record.clone()),
            )
            .await?;
        tracing::info!(
            %job_id,
            status = %JobStatus::Generating,
            app_name = record.app_name(),
            abilities = ?record.abilities(),
            "orchestration recorded"
        );

        let code = self.synthesizer.synthesize_with(&record, options).await?;
        self.store
            .update_status(
                job_id,
                StatusUpdate::new(JobStatus::Deploying, &*self.clock).with_code(code.clone()),
            )
            .await?;
        tracing::info!(%job_id, status = %JobStatus::Deploying, bytes = code.len(), "code recorded");

        let spec = BuildSpec::for_app(record.app_name(), code.clone());
        let (deployment, degraded) = match self.deployer.attempt(&spec).await {
            Ok(deployment) => (deployment, false),
            Err(fallback) => (fallback.into_deployment(), true),
        };
        let ready = self
            .store
            .update_status(
                job_id,
                StatusUpdate::new(JobStatus::Ready, &*self.clock)
                    .with_deployment(deployment.url(), deployment.deploy_id()),
            )
            .await?;
        tracing::info!(
            %job_id,
            status = %JobStatus::Ready,
            deploy_id = deployment.deploy_id(),
            url = deployment.url(),
            degraded,
            "job ready"
        );

        let deploy_time_seconds = (ready.updated_at() - ready.created_at())
            .to_std()
            .map_or(0.0, |elapsed| elapsed.as_secs_f64());
        Ok(GenerationResult {
            app_id: job_id,
            url: deployment.url().to_owned(),
            code,
            abilities: record.abilities().to_vec(),
            orchestration: record,
            deploy_time_seconds,
            degraded,
        })
    }

    async fn mark_failed(&self, job_id: JobId, err: &PipelineError) {
        let update = StatusUpdate::new(JobStatus::Failed, &*self.clock).with_error(err.to_string());
        if let Err(store_err) = self.store.update_status(job_id, update).await {
            tracing::warn!(%job_id, error = %store_err, "could not record job failure");
        }
    }

    fn report(job_id: Option<JobId>, err: &PipelineError) -> GenerateFailure {
        let failure = GenerateFailure::from(err);
        tracing::error!(
            job_id = job_id.map(tracing::field::display),
            code = %failure.code,
            error = %err,
            "generation failed"
        );
        failure
    }

    /// Finds a job by identifier.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the lookup fails.
    pub async fn get_job(&self, id: JobId) -> JobStoreResult<Option<Job>> {
        self.store.get(id).await
    }

    /// Lists a user's jobs, newest first.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the query fails.
    pub async fn list_jobs_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> JobStoreResult<Vec<Job>> {
        self.store.list_by_user(user_id, limit, offset).await
    }

    /// Moves a `ready` job to `expired`. Called by the external expiry
    /// sweep.
    ///
    /// # Errors
    ///
    /// Returns [`crate::job::ports::JobStoreError::NotFound`] for an
    /// unknown job and [`crate::job::ports::JobStoreError::Domain`] when
    /// the job is not `ready`.
    pub async fn expire_job(&self, id: JobId) -> JobStoreResult<Job> {
        let job = self
            .store
            .update_status(id, StatusUpdate::new(JobStatus::Expired, &*self.clock))
            .await?;
        tracing::info!(job_id = %id, status = %job.status(), "job expired");
        Ok(job)
    }

    /// Counts jobs by status.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the query fails.
    pub async fn statistics(&self) -> JobStoreResult<JobStatistics> {
        let by_status = self.store.status_counts().await?;
        Ok(JobStatistics {
            total: by_status.values().sum(),
            by_status,
        })
    }

    /// Reports the state of a deployment.
    pub async fn deployment_status(&self, deploy_id: &str) -> DeploymentStatus {
        self.deployer.status(deploy_id).await
    }

    /// Reports which providers are configured.
    #[must_use]
    pub fn health(&self) -> HealthReport {
        HealthReport {
            model_provider_configured: self.orchestrator.is_configured(),
            deployment_provider_configured: self.deployer.is_configured(),
            synthesis_strategy: self.synthesizer.strategy(),
        }
    }
}
