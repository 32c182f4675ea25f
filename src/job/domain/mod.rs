//! Domain model for generation jobs.

mod error;
mod ids;
mod job;
mod status;

pub use error::{JobDomainError, ParseJobStatusError};
pub use ids::{JobId, UserId};
pub use job::{Job, StatusUpdate};
pub use status::JobStatus;
