//! Pipeline domain model

use crate::core::state::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stage label the metrics export reserves for a pipeline's own status
pub const OVERALL_STAGE: &str = "overall";

/// Check that `name` can be used as a stage name
pub fn check_stage_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("stage name must not be empty".to_string());
    }
    if name == OVERALL_STAGE {
        return Err(format!("stage name '{}' is reserved", OVERALL_STAGE));
    }
    Ok(())
}

/// A single named step within a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Stage name (unique within its pipeline)
    pub name: String,

    /// Current stage status
    pub status: Status,
}

impl Stage {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Mutable pipeline record owned by the registry
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Pipeline name
    pub name: String,

    /// Overall status (set independently of the stages)
    pub status: Status,

    /// Stages in execution order
    pub stages: Vec<Stage>,

    /// Number of mutations applied since registration
    pub revision: u64,

    /// When the pipeline was registered or last mutated
    pub updated_at: DateTime<Utc>,
}

impl Pipeline {
    /// Create a pipeline at revision 0
    pub fn new(name: impl Into<String>, status: Status, stages: Vec<Stage>) -> Self {
        Self {
            name: name.into(),
            status,
            stages,
            revision: 0,
            updated_at: Utc::now(),
        }
    }

    /// Get a mutable stage by name
    pub fn stage_mut(&mut self, name: &str) -> Option<&mut Stage> {
        self.stages.iter_mut().find(|s| s.name == name)
    }

    /// Find the first stage name that appears more than once
    pub fn duplicate_stage(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        for stage in &self.stages {
            if !seen.insert(stage.name.as_str()) {
                return Some(stage.name.as_str());
            }
        }
        None
    }

    /// Record that a mutation was applied
    pub fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Utc::now();
    }

    /// Detached copy of the current state
    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            pipeline_name: self.name.clone(),
            status: self.status,
            revision: self.revision,
            updated_at: self.updated_at,
            stages: self
                .stages
                .iter()
                .map(|s| StageSnapshot {
                    stage_name: s.name.clone(),
                    status: s.status,
                })
                .collect(),
        }
    }
}

/// Immutable point-in-time view of a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSnapshot {
    pub pipeline_name: String,
    pub status: Status,
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
    pub stages: Vec<StageSnapshot>,
}

/// Immutable view of one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub stage_name: String,
    pub status: Status,
}

impl PipelineSnapshot {
    /// Get a stage by name
    pub fn stage(&self, name: &str) -> Option<&StageSnapshot> {
        self.stages.iter().find(|s| s.stage_name == name)
    }

    /// Overall status derived from the stages, see [`Status::derive_from`]
    pub fn derived_status(&self) -> Status {
        Status::derive_from(self.stages.iter().map(|s| s.status))
    }
}
