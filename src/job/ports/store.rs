//! Store port for job persistence and queries.

use crate::job::domain::{Job, JobDomainError, JobId, JobStatus, StatusUpdate, UserId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job store operations.
pub type JobStoreResult<T> = Result<T, JobStoreError>;

/// Job persistence contract.
///
/// Implementations must be safe for concurrent use; different jobs are
/// updated independently and updates to one job are applied in order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Stores a new job and returns the stored copy.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError::Duplicate`] when the identifier is taken.
    async fn create(&self, job: Job) -> JobStoreResult<Job>;

    /// Applies a status update and returns the updated job.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError::NotFound`] when the job does not exist and
    /// [`JobStoreError::Domain`] when the update is rejected by the job.
    async fn update_status(&self, id: JobId, update: StatusUpdate) -> JobStoreResult<Job>;

    /// Finds a job by identifier.
    async fn get(&self, id: JobId) -> JobStoreResult<Option<Job>>;

    /// Returns a user's jobs, newest first.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> JobStoreResult<Vec<Job>>;

    /// Returns the number of jobs per status. Statuses without jobs are
    /// omitted.
    async fn status_counts(&self) -> JobStoreResult<BTreeMap<JobStatus, usize>>;
}

/// Errors returned by job store implementations.
#[derive(Debug, Clone, Error)]
pub enum JobStoreError {
    /// A job with the same identifier already exists.
    #[error("duplicate job identifier: {0}")]
    Duplicate(JobId),

    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// The job rejected the update.
    #[error(transparent)]
    Domain(#[from] JobDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
