//! Deployment service with mock fallback.

mod adapter;

pub use adapter::{DeploymentAdapter, MOCK_HOST_SUFFIX};
