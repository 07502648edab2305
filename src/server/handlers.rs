//! HTTP request handlers

use crate::core::{PipelineSnapshot, Stage, Status};
use crate::metrics::{project_all, PROMETHEUS_CONTENT_TYPE};
use crate::server::{error::ServerError, render::render_dashboard, AppState};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /pipeline`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPipelineRequest {
    pub pipeline_name: String,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub stages: Vec<RegisterStage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterStage {
    pub stage_name: String,

    #[serde(default)]
    pub status: Status,
}

/// Body of the status update endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: Status,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_dashboard(&state.registry.snapshot_all()))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "pipelines": state.registry.len(),
    }))
}

/// GET /pipeline
pub async fn list_pipelines(State(state): State<AppState>) -> Json<Vec<PipelineSnapshot>> {
    Json(state.registry.snapshot_all())
}

/// GET /pipeline/:name
pub async fn get_pipeline(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PipelineSnapshot>, ServerError> {
    Ok(Json(state.registry.snapshot(&name)?))
}

/// POST /pipeline
pub async fn register_pipeline(
    State(state): State<AppState>,
    Json(request): Json<RegisterPipelineRequest>,
) -> Result<(StatusCode, Json<PipelineSnapshot>), ServerError> {
    let stages = request
        .stages
        .into_iter()
        .map(|s| Stage::new(s.stage_name, s.status))
        .collect();

    state
        .registry
        .register_pipeline_with_status(&request.pipeline_name, request.status, stages)?;

    let snapshot = state.registry.snapshot(&request.pipeline_name)?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// PUT /pipeline/:name/status
pub async fn update_pipeline_status(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<PipelineSnapshot>, ServerError> {
    state.registry.update_pipeline_status(&name, update.status)?;
    Ok(Json(state.registry.snapshot(&name)?))
}

/// PUT /pipeline/:name/stages/:stage
pub async fn update_stage(
    State(state): State<AppState>,
    Path((name, stage)): Path<(String, String)>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<PipelineSnapshot>, ServerError> {
    state.registry.update_stage(&name, &stage, update.status)?;
    Ok(Json(state.registry.snapshot(&name)?))
}

/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> Result<Response, ServerError> {
    let observations = project_all(&state.registry.snapshot_all());
    let body = state.exporter.render(&observations)?;

    Ok(([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body).into_response())
}
