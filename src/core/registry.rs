//! In-memory registry of pipeline state
//!
//! The registry owns every pipeline record. Writers mutate a record in place
//! under that pipeline's own lock; readers copy it out as a
//! [`PipelineSnapshot`]. The outer lock only guards the name index, so
//! operations on different pipelines never wait on each other.

use crate::core::{
    config::MonitorConfig,
    error::RegistryError,
    pipeline::{check_stage_name, Pipeline, PipelineSnapshot, Stage},
    state::Status,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

type Entry = Arc<RwLock<Pipeline>>;

#[derive(Default)]
struct Index {
    /// Entries in registration order
    order: Vec<Entry>,
    /// Pipeline name -> position in `order`
    by_name: HashMap<String, usize>,
}

/// Thread-safe store of named pipelines
#[derive(Default)]
pub struct PipelineRegistry {
    index: RwLock<Index>,
}

impl PipelineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every pipeline from a seed configuration
    pub fn from_config(config: &MonitorConfig) -> Result<Self, RegistryError> {
        let registry = Self::new();
        for pipeline in config.to_pipelines() {
            registry.insert(pipeline)?;
        }
        Ok(registry)
    }

    /// Register a pipeline whose overall status starts as `Pending`
    pub fn register_pipeline(&self, name: &str, stages: Vec<Stage>) -> Result<(), RegistryError> {
        self.register_pipeline_with_status(name, Status::Pending, stages)
    }

    /// Register a pipeline with an explicit overall status
    pub fn register_pipeline_with_status(
        &self,
        name: &str,
        status: Status,
        stages: Vec<Stage>,
    ) -> Result<(), RegistryError> {
        self.insert(Pipeline::new(name, status, stages))
    }

    fn insert(&self, pipeline: Pipeline) -> Result<(), RegistryError> {
        if pipeline.name.trim().is_empty() {
            return Err(RegistryError::InvalidName(
                "pipeline name must not be empty".to_string(),
            ));
        }
        for stage in &pipeline.stages {
            check_stage_name(&stage.name).map_err(|reason| {
                RegistryError::InvalidName(format!("pipeline '{}': {}", pipeline.name, reason))
            })?;
        }
        if let Some(stage) = pipeline.duplicate_stage() {
            return Err(RegistryError::DuplicateStage {
                pipeline: pipeline.name.clone(),
                stage: stage.to_string(),
            });
        }

        let mut index = self.index.write();
        if index.by_name.contains_key(&pipeline.name) {
            warn!(pipeline = %pipeline.name, "Rejected duplicate pipeline registration");
            return Err(RegistryError::DuplicatePipeline(pipeline.name));
        }

        info!(
            pipeline = %pipeline.name,
            stages = pipeline.stages.len(),
            "Registered pipeline"
        );
        let position = index.order.len();
        index.by_name.insert(pipeline.name.clone(), position);
        index.order.push(Arc::new(RwLock::new(pipeline)));

        Ok(())
    }

    /// Look up a pipeline's entry, holding the index lock only for the lookup
    fn entry(&self, name: &str) -> Result<Entry, RegistryError> {
        let index = self.index.read();
        let position = *index
            .by_name
            .get(name)
            .ok_or_else(|| RegistryError::PipelineNotFound(name.to_string()))?;
        Ok(Arc::clone(&index.order[position]))
    }

    /// Set the status of one stage, leaving every other stage untouched
    pub fn update_stage(
        &self,
        pipeline_name: &str,
        stage_name: &str,
        status: Status,
    ) -> Result<(), RegistryError> {
        let entry = self.entry(pipeline_name).map_err(|e| {
            warn!(pipeline = %pipeline_name, stage = %stage_name, "Rejected stage update: {}", e);
            e
        })?;
        let mut pipeline = entry.write();

        match pipeline.stage_mut(stage_name) {
            Some(stage) => {
                let previous = stage.status;
                stage.status = status;
                pipeline.touch();
                debug!(
                    pipeline = %pipeline_name,
                    stage = %stage_name,
                    from = %previous,
                    to = %status,
                    revision = pipeline.revision,
                    "Updated stage"
                );
                Ok(())
            }
            None => {
                let err = RegistryError::StageNotFound {
                    pipeline: pipeline_name.to_string(),
                    stage: stage_name.to_string(),
                };
                warn!(pipeline = %pipeline_name, stage = %stage_name, "Rejected stage update: {}", err);
                Err(err)
            }
        }
    }

    /// Set a pipeline's overall status
    pub fn update_pipeline_status(
        &self,
        pipeline_name: &str,
        status: Status,
    ) -> Result<(), RegistryError> {
        let entry = self.entry(pipeline_name).map_err(|e| {
            warn!(pipeline = %pipeline_name, "Rejected status update: {}", e);
            e
        })?;
        let mut pipeline = entry.write();

        let previous = pipeline.status;
        pipeline.status = status;
        pipeline.touch();
        debug!(
            pipeline = %pipeline_name,
            from = %previous,
            to = %status,
            revision = pipeline.revision,
            "Updated pipeline status"
        );

        Ok(())
    }

    /// Copy out one pipeline's current state
    pub fn snapshot(&self, pipeline_name: &str) -> Result<PipelineSnapshot, RegistryError> {
        let entry = self.entry(pipeline_name)?;
        let pipeline = entry.read();
        Ok(pipeline.snapshot())
    }

    /// Copy out every pipeline, in registration order.
    ///
    /// Each snapshot is consistent on its own; the set as a whole is not
    /// taken atomically across pipelines.
    pub fn snapshot_all(&self) -> Vec<PipelineSnapshot> {
        let entries: Vec<Entry> = self.index.read().order.iter().cloned().collect();
        entries.iter().map(|entry| entry.read().snapshot()).collect()
    }

    /// Registered pipeline names, in registration order
    pub fn names(&self) -> Vec<String> {
        let entries: Vec<Entry> = self.index.read().order.iter().cloned().collect();
        entries.iter().map(|entry| entry.read().name.clone()).collect()
    }

    /// Check if a pipeline is registered
    pub fn contains(&self, pipeline_name: &str) -> bool {
        self.index.read().by_name.contains_key(pipeline_name)
    }

    /// Number of registered pipelines
    pub fn len(&self) -> usize {
        self.index.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
