//! Flatten snapshots into labeled gauge observations

use crate::core::{PipelineSnapshot, Status};
use serde::Serialize;

pub use crate::core::OVERALL_STAGE;

/// One gauge sample: status is carried as a label, the value is always 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub pipeline_name: String,
    pub stage_name: String,
    pub status: Status,
    pub value: f64,
}

impl Observation {
    fn new(pipeline_name: &str, stage_name: &str, status: Status) -> Self {
        Self {
            pipeline_name: pipeline_name.to_string(),
            stage_name: stage_name.to_string(),
            status,
            value: 1.0,
        }
    }

    /// Label values in `pipeline_name, stage_name, status` order
    pub fn label_values(&self) -> [&str; 3] {
        [self.pipeline_name.as_str(), self.stage_name.as_str(), self.status.as_str()]
    }
}

/// Project one snapshot: the overall observation first, then one per stage in order
pub fn project(snapshot: &PipelineSnapshot) -> Vec<Observation> {
    let mut observations = Vec::with_capacity(snapshot.stages.len() + 1);
    observations.push(Observation::new(
        &snapshot.pipeline_name,
        OVERALL_STAGE,
        snapshot.status,
    ));
    observations.extend(
        snapshot
            .stages
            .iter()
            .map(|stage| Observation::new(&snapshot.pipeline_name, &stage.stage_name, stage.status)),
    );
    observations
}

/// Project several snapshots, keeping their order
pub fn project_all(snapshots: &[PipelineSnapshot]) -> Vec<Observation> {
    snapshots.iter().flat_map(project).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Pipeline, Stage};

    fn snapshot() -> PipelineSnapshot {
        Pipeline::new(
            "web",
            Status::Running,
            vec![
                Stage::new("Build", Status::Success),
                Stage::new("Test", Status::Running),
                Stage::new("Deploy", Status::Pending),
            ],
        )
        .snapshot()
    }

    #[test]
    fn test_one_observation_per_stage_plus_overall() {
        let observations = project(&snapshot());
        assert_eq!(observations.len(), 4);
        assert!(observations.iter().all(|o| o.value == 1.0));
        assert!(observations.iter().all(|o| o.pipeline_name == "web"));

        assert_eq!(observations[0].label_values(), ["web", "overall", "Running"]);
        assert_eq!(observations[1].label_values(), ["web", "Build", "Success"]);
        assert_eq!(observations[2].label_values(), ["web", "Test", "Running"]);
        assert_eq!(observations[3].label_values(), ["web", "Deploy", "Pending"]);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let snapshot = snapshot();
        assert_eq!(project(&snapshot), project(&snapshot));
    }

    #[test]
    fn test_pipeline_without_stages() {
        let snapshot = Pipeline::new("empty", Status::Pending, vec![]).snapshot();
        let observations = project(&snapshot);
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].stage_name, OVERALL_STAGE);
    }

    #[test]
    fn test_project_all_keeps_order() {
        let other = Pipeline::new("api", Status::Failed, vec![]).snapshot();
        let observations = project_all(&[snapshot(), other]);
        assert_eq!(observations.len(), 5);
        assert_eq!(observations[4].label_values(), ["api", "overall", "Failed"]);
    }
}
