//! Job aggregate root and status updates.

use super::{JobDomainError, JobId, JobStatus, UserId};
use crate::orchestration::domain::{OrchestrationRecord, Prompt};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single prompt-to-application generation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    id: JobId,
    user_id: Option<UserId>,
    prompt: Prompt,
    status: JobStatus,
    orchestration: Option<OrchestrationRecord>,
    code: Option<String>,
    deployed_url: Option<String>,
    deploy_id: Option<String>,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates a job in the `generating` status with a placeholder
    /// orchestration.
    #[must_use]
    pub fn new(prompt: Prompt, user_id: Option<UserId>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: JobId::new(),
            user_id,
            prompt,
            status: JobStatus::Generating,
            orchestration: Some(OrchestrationRecord::pending()),
            code: None,
            deployed_url: None,
            deploy_id: None,
            error: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the requesting user, if one was given.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Returns the validated prompt.
    #[must_use]
    pub const fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the orchestration record, a placeholder until orchestration
    /// completes.
    #[must_use]
    pub const fn orchestration(&self) -> Option<&OrchestrationRecord> {
        self.orchestration.as_ref()
    }

    /// Returns the synthesized source once produced.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the public URL once deployed.
    #[must_use]
    pub fn deployed_url(&self) -> Option<&str> {
        self.deployed_url.as_deref()
    }

    /// Returns the provider deployment identifier once deployed.
    #[must_use]
    pub fn deploy_id(&self) -> Option<&str> {
        self.deploy_id.as_deref()
    }

    /// Returns the failure description of a failed job.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the latest update.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies `update`, merging its fields into the job.
    ///
    /// Fields absent from the update keep their previous values.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidStatusTransition`] when the status
    /// change is not allowed, [`JobDomainError::MissingStageOutput`] when
    /// `deploying` lacks code or `ready` lacks a URL, and
    /// [`JobDomainError::ErrorOutsideFailure`] when an error accompanies a
    /// status other than `failed`.
    pub fn apply(&mut self, update: StatusUpdate) -> Result<(), JobDomainError> {
        let to = update.status;
        if !self.status.can_transition_to(to) {
            return Err(JobDomainError::InvalidStatusTransition {
                job_id: self.id,
                from: self.status,
                to,
            });
        }
        if update.error.is_some() && to != JobStatus::Failed {
            return Err(JobDomainError::ErrorOutsideFailure {
                job_id: self.id,
                status: to,
            });
        }
        let has_code = update.code.is_some() || self.code.is_some();
        if to == JobStatus::Deploying && !has_code {
            return Err(self.missing(to, "code"));
        }
        let has_url = update.deployed_url.is_some() || self.deployed_url.is_some();
        if to == JobStatus::Ready && !has_url {
            return Err(self.missing(to, "deployed_url"));
        }

        self.status = to;
        merge(&mut self.orchestration, update.orchestration);
        merge(&mut self.code, update.code);
        merge(&mut self.deployed_url, update.deployed_url);
        merge(&mut self.deploy_id, update.deploy_id);
        merge(&mut self.error, update.error);
        self.updated_at = update.at;
        Ok(())
    }

    const fn missing(&self, status: JobStatus, field: &'static str) -> JobDomainError {
        JobDomainError::MissingStageOutput {
            job_id: self.id,
            status,
            field,
        }
    }
}

fn merge<T>(field: &mut Option<T>, value: Option<T>) {
    if let Some(new_value) = value {
        *field = Some(new_value);
    }
}

/// A status change plus the stage output recorded with it.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    status: JobStatus,
    orchestration: Option<OrchestrationRecord>,
    code: Option<String>,
    deployed_url: Option<String>,
    deploy_id: Option<String>,
    error: Option<String>,
    at: DateTime<Utc>,
}

impl StatusUpdate {
    /// Creates an update to `status` stamped with the current time.
    #[must_use]
    pub fn new(status: JobStatus, clock: &impl Clock) -> Self {
        Self {
            status,
            orchestration: None,
            code: None,
            deployed_url: None,
            deploy_id: None,
            error: None,
            at: clock.utc(),
        }
    }

    /// Records the orchestration result.
    #[must_use]
    pub fn with_orchestration(mut self, record: OrchestrationRecord) -> Self {
        self.orchestration = Some(record);
        self
    }

    /// Records the synthesized source.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Records the deployment URL and provider identifier.
    #[must_use]
    pub fn with_deployment(mut self, url: impl Into<String>, deploy_id: impl Into<String>) -> Self {
        self.deployed_url = Some(url.into());
        self.deploy_id = Some(deploy_id.into());
        self
    }

    /// Records a failure description.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Returns the target status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }
}
