//! Factoria: turns a free-text prompt into a generated web application and a
//! live URL.
//!
//! A generation job runs one pipeline:
//!
//! 1. the [`orchestration`] context asks a language model which abilities
//!    the application needs and recovers a typed record from the reply
//!    through [`extraction`];
//! 2. the [`synthesis`] context renders application source from that
//!    record, by template or with a second model call;
//! 3. the [`deployment`] context publishes the source, degrading to a
//!    deterministic mock URL when the provider is absent or failing;
//! 4. the [`job`] context persists every stage and exposes the pipeline
//!    entry point.
//!
//! # Architecture
//!
//! Each context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP providers,
//!   in-memory storage)
//! - **Services**: Use cases composed from domain types and ports

pub mod bootstrap;
pub mod config;
pub mod deployment;
pub mod extraction;
pub mod gateway;
pub mod job;
pub mod naming;
pub mod orchestration;
pub mod synthesis;
pub mod telemetry;

#[cfg(test)]
mod test_support;
