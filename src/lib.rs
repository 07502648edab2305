//! pipeline-monitor - A status dashboard for CI/CD pipelines

pub mod cli;
pub mod core;
pub mod metrics;
pub mod server;

// Re-export commonly used types
pub use crate::core::{PipelineRegistry, PipelineSnapshot, RegistryError, Stage, StageSnapshot, Status};
pub use metrics::{project, MetricsExporter, Observation};
