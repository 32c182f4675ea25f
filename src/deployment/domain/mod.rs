//! Domain model for deployments.

mod build_spec;
mod deployment;

pub use build_spec::{BuildFile, BuildSpec};
pub use deployment::{Degraded, DegradedReason, Deployment, DeploymentState, DeploymentStatus};
