//! Registry error types

use thiserror::Error;

/// Errors returned by [`PipelineRegistry`](crate::core::PipelineRegistry) operations.
///
/// A failed operation never leaves the registry partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Pipeline '{0}' is already registered")]
    DuplicatePipeline(String),

    #[error("Pipeline '{0}' not found")]
    PipelineNotFound(String),

    #[error("Stage '{stage}' not found in pipeline '{pipeline}'")]
    StageNotFound { pipeline: String, stage: String },

    #[error("Stage '{stage}' appears more than once in pipeline '{pipeline}'")]
    DuplicateStage { pipeline: String, stage: String },

    #[error("Invalid name: {0}")]
    InvalidName(String),
}
