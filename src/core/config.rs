//! Seed configuration loaded from YAML

use crate::core::{
    pipeline::{check_stage_name, Pipeline, Stage},
    state::Status,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Top-level seed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Pipelines to register at startup, in order
    #[serde(default)]
    pub pipelines: Vec<PipelineConfig>,
}

/// Pipeline as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Unique pipeline name
    pub name: String,

    /// Initial overall status
    #[serde(default)]
    pub status: Status,

    /// Stages in execution order
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

/// Stage as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,

    #[serde(default)]
    pub status: Status,
}

impl MonitorConfig {
    /// Load seed configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse seed configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: MonitorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// The pipeline shown when no seed file is given
    pub fn demo() -> Self {
        Self {
            pipelines: vec![PipelineConfig {
                name: "My DevOps Pipeline".to_string(),
                status: Status::Running,
                stages: vec![
                    StageConfig {
                        name: "Build".to_string(),
                        status: Status::Success,
                    },
                    StageConfig {
                        name: "Test".to_string(),
                        status: Status::Running,
                    },
                    StageConfig {
                        name: "Deploy".to_string(),
                        status: Status::Pending,
                    },
                ],
            }],
        }
    }

    /// Validate the seed configuration
    pub fn validate(&self) -> Result<()> {
        let mut seen_pipelines = HashSet::new();

        for pipeline in &self.pipelines {
            if pipeline.name.trim().is_empty() {
                anyhow::bail!("Pipeline name must not be empty");
            }
            if !seen_pipelines.insert(&pipeline.name) {
                anyhow::bail!("Duplicate pipeline name: {}", pipeline.name);
            }

            let mut seen_stages = HashSet::new();
            for stage in &pipeline.stages {
                if let Err(reason) = check_stage_name(&stage.name) {
                    anyhow::bail!("Pipeline '{}': {}", pipeline.name, reason);
                }
                if !seen_stages.insert(&stage.name) {
                    anyhow::bail!(
                        "Pipeline '{}' has duplicate stage '{}'",
                        pipeline.name,
                        stage.name
                    );
                }
            }
        }

        Ok(())
    }

    /// Total number of stages across all pipelines
    pub fn stage_count(&self) -> usize {
        self.pipelines.iter().map(|p| p.stages.len()).sum()
    }

    /// Convert config to pipeline records
    pub fn to_pipelines(&self) -> Vec<Pipeline> {
        self.pipelines.iter().map(PipelineConfig::to_pipeline).collect()
    }
}

impl PipelineConfig {
    pub fn to_pipeline(&self) -> Pipeline {
        let stages = self
            .stages
            .iter()
            .map(|s| Stage::new(s.name.clone(), s.status))
            .collect();
        Pipeline::new(self.name.clone(), self.status, stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_file() {
        let yaml = r#"
pipelines:
  - name: "web"
    status: Running
    stages:
      - name: Build
        status: Success
      - name: Test
  - name: "worker"
"#;

        let config = MonitorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.pipelines.len(), 2);
        assert_eq!(config.pipelines[0].status, Status::Running);
        assert_eq!(config.pipelines[0].stages[1].status, Status::Pending);
        assert_eq!(config.pipelines[1].status, Status::Pending);
        assert!(config.pipelines[1].stages.is_empty());
        assert_eq!(config.stage_count(), 2);
    }

    #[test]
    fn test_duplicate_pipeline_fails() {
        let yaml = r#"
pipelines:
  - name: "web"
  - name: "web"
"#;

        let err = MonitorConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate pipeline name: web"));
    }

    #[test]
    fn test_duplicate_stage_fails() {
        let yaml = r#"
pipelines:
  - name: "web"
    stages:
      - name: Build
      - name: Build
"#;

        let err = MonitorConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate stage 'Build'"));
    }

    #[test]
    fn test_reserved_stage_name_fails() {
        let yaml = r#"
pipelines:
  - name: "web"
    stages:
      - name: overall
"#;

        let err = MonitorConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("stage name 'overall' is reserved"));
    }

    #[test]
    fn test_empty_stage_name_fails() {
        let yaml = r#"
pipelines:
  - name: "web"
    stages:
      - name: ""
"#;

        let err = MonitorConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("stage name must not be empty"));
    }

    #[test]
    fn test_lowercase_status_is_accepted() {
        let yaml = r#"
pipelines:
  - name: "web"
    status: running
    stages:
      - name: Build
        status: success
"#;

        let config = MonitorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.pipelines[0].status, Status::Running);
        assert_eq!(config.pipelines[0].stages[0].status, Status::Success);
    }

    #[test]
    fn test_unknown_status_fails() {
        let yaml = r#"
pipelines:
  - name: "web"
    status: Done
"#;

        assert!(MonitorConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_demo_pipeline() {
        let config = MonitorConfig::demo();
        config.validate().unwrap();

        let pipelines = config.to_pipelines();
        assert_eq!(pipelines[0].name, "My DevOps Pipeline");
        assert_eq!(pipelines[0].status, Status::Running);
        assert_eq!(pipelines[0].stages.len(), 3);
    }
}
