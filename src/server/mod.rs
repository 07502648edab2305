//! HTTP surface: HTML dashboard, JSON API and Prometheus scrape endpoint

pub mod error;
pub mod handlers;
pub mod render;

use crate::core::PipelineRegistry;
use crate::metrics::MetricsExporter;
use axum::{
    routing::{get, put},
    Router,
};
use handlers::*;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::ServerError;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<PipelineRegistry>,
    pub exporter: Arc<MetricsExporter>,
}

impl AppState {
    pub fn new(registry: Arc<PipelineRegistry>, exporter: Arc<MetricsExporter>) -> Self {
        Self { registry, exporter }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/pipeline", get(list_pipelines).post(register_pipeline))
        .route("/pipeline/:name", get(get_pipeline))
        .route("/pipeline/:name/status", put(update_pipeline_status))
        .route("/pipeline/:name/stages/:stage", put(update_stage))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
