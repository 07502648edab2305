//! Metrics export
//!
//! # Metrics
//!
//! - `pipeline_monitor{pipeline_name, stage_name, status}` - always 1; the
//!   pipeline's own status uses `stage_name="overall"`.

pub mod exporter;
pub mod projector;

pub use exporter::{MetricsExporter, PROMETHEUS_CONTENT_TYPE};
pub use projector::{project, project_all, Observation, OVERALL_STAGE};
