//! Adapter implementations of the deployment provider port.

pub mod vercel;

pub use vercel::VercelDeploymentProvider;
