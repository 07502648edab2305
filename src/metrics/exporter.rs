//! Prometheus text exposition of projected observations

use crate::metrics::projector::Observation;
use parking_lot::Mutex;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

/// Content type for Prometheus metrics.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Gauge family name
pub const METRIC_NAME: &str = "pipeline_monitor";

const METRIC_HELP: &str = "DevOps pipeline monitor";

const LABELS: &[&str] = &["pipeline_name", "stage_name", "status"];

/// Owns the Prometheus registry holding the `pipeline_monitor` gauge vector
pub struct MetricsExporter {
    registry: Registry,
    /// Guards reset + set + gather so concurrent scrapes don't interleave
    gauge: Mutex<GaugeVec>,
}

impl MetricsExporter {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let gauge = GaugeVec::new(Opts::new(METRIC_NAME, METRIC_HELP), LABELS)?;
        registry.register(Box::new(gauge.clone()))?;

        Ok(Self {
            registry,
            gauge: Mutex::new(gauge),
        })
    }

    /// Replace all series with `observations` and encode the registry.
    ///
    /// Series not present in `observations` are dropped, so a stage that
    /// changed status does not keep reporting its old status label.
    pub fn render(&self, observations: &[Observation]) -> prometheus::Result<String> {
        let gauge = self.gauge.lock();
        gauge.reset();
        for observation in observations {
            gauge
                .get_metric_with_label_values(&observation.label_values())?
                .set(observation.value);
        }

        let metric_families = self.registry.gather();
        drop(gauge);

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Pipeline, Stage, Status};
    use crate::metrics::projector::project;

    fn observations(deploy: Status) -> Vec<Observation> {
        project(
            &Pipeline::new(
                "web",
                Status::Running,
                vec![
                    Stage::new("Build", Status::Success),
                    Stage::new("Deploy", deploy),
                ],
            )
            .snapshot(),
        )
    }

    #[test]
    fn test_render_exposition_format() {
        let exporter = MetricsExporter::new().unwrap();
        let text = exporter.render(&observations(Status::Pending)).unwrap();

        assert!(text.contains("# HELP pipeline_monitor DevOps pipeline monitor"));
        assert!(text.contains("# TYPE pipeline_monitor gauge"));
        assert!(text.contains(
            r#"pipeline_monitor{pipeline_name="web",stage_name="overall",status="Running"} 1"#
        ));
        assert!(text.contains(
            r#"pipeline_monitor{pipeline_name="web",stage_name="Deploy",status="Pending"} 1"#
        ));
    }

    #[test]
    fn test_render_drops_stale_series() {
        let exporter = MetricsExporter::new().unwrap();
        exporter.render(&observations(Status::Pending)).unwrap();
        let text = exporter.render(&observations(Status::Success)).unwrap();

        assert!(text.contains(r#"stage_name="Deploy",status="Success"} 1"#));
        assert!(!text.contains(r#"stage_name="Deploy",status="Pending""#));
    }

    #[test]
    fn test_render_empty() {
        let exporter = MetricsExporter::new().unwrap();
        let text = exporter.render(&[]).unwrap();
        assert!(!text.contains("pipeline_name="));
    }
}
