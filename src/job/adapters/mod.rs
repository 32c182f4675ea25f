//! Adapter implementations of job ports.

mod memory;

pub use memory::InMemoryJobStore;
