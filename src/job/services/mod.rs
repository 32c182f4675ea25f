//! Job lifecycle service and pipeline entry-point types.

mod lifecycle;
mod pipeline;

pub use lifecycle::{GenerateRequest, JobLifecycleService};
pub use pipeline::{
    FailureCode, GenerateFailure, GenerationResult, HealthReport, JobStatistics, PipelineError,
    PipelineResult,
};
