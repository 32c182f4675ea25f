//! Port contracts for deployment providers.

pub mod provider;

pub use provider::{DeploymentProvider, DeploymentProviderError, DeploymentProviderResult};

#[cfg(test)]
pub use provider::MockDeploymentProvider;
