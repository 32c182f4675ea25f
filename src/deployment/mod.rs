//! Deployment of generated applications.
//!
//! A missing or failing provider never fails a job: the
//! [`services::DeploymentAdapter`] substitutes a deterministic mock
//! deployment and reports the substitution as a
//! [`domain::Degraded`] outcome.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Fallback service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
