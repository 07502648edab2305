//! Test utility functions for pipeline-monitor

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pipeline_monitor::core::config::MonitorConfig;
use pipeline_monitor::server::{create_router, AppState};
use pipeline_monitor::{MetricsExporter, PipelineRegistry, Stage, Status};
use std::sync::Arc;
use tower::ServiceExt;

/// Registry seeded with the demo pipeline ("My DevOps Pipeline")
pub fn demo_registry() -> Arc<PipelineRegistry> {
    Arc::new(PipelineRegistry::from_config(&MonitorConfig::demo()).expect("demo config is valid"))
}

/// Build stages from (name, status) pairs
pub fn stages(specs: &[(&str, Status)]) -> Vec<Stage> {
    specs
        .iter()
        .map(|(name, status)| Stage::new(*name, *status))
        .collect()
}

/// Router over the given registry with a fresh exporter
pub fn app(registry: Arc<PipelineRegistry>) -> Router {
    let exporter = Arc::new(MetricsExporter::new().expect("exporter"));
    create_router(AppState::new(registry, exporter))
}

/// Send one request and return status + body text
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.expect("request should be served");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    (status, String::from_utf8(bytes.to_vec()).expect("body should be UTF-8"))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
