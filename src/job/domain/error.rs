//! Error types for job domain validation and parsing.

use super::{JobId, JobStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning jobs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The job cannot move from its current status to the requested one.
    #[error("invalid job status transition for {job_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Job identifier.
        job_id: JobId,
        /// Current status.
        from: JobStatus,
        /// Requested status.
        to: JobStatus,
    },

    /// The requested status requires a field the job does not have.
    #[error("job {job_id} cannot become {status} without {field}")]
    MissingStageOutput {
        /// Job identifier.
        job_id: JobId,
        /// Requested status.
        status: JobStatus,
        /// Missing field name.
        field: &'static str,
    },

    /// An error description was supplied for a non-failed status.
    #[error("job {job_id} may only record an error when failed, not {status}")]
    ErrorOutsideFailure {
        /// Job identifier.
        job_id: JobId,
        /// Requested status.
        status: JobStatus,
    },
}

/// Error returned while parsing a job status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseJobStatusError(pub String);
