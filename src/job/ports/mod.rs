//! Port contracts for job persistence.

mod store;

#[cfg(test)]
pub use store::MockJobStore;
pub use store::{JobStore, JobStoreError, JobStoreResult};
