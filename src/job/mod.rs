//! Generation jobs: the job aggregate, its store, and the lifecycle
//! manager that runs the prompt-to-deployment pipeline.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
