//! Server error types

use crate::core::RegistryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error returned from request handlers
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Registry(err) => match err {
                RegistryError::PipelineNotFound(_) | RegistryError::StageNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                RegistryError::DuplicatePipeline(_) | RegistryError::DuplicateStage { .. } => {
                    StatusCode::CONFLICT
                }
                RegistryError::InvalidName(_) => StatusCode::BAD_REQUEST,
            },
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<prometheus::Error> for ServerError {
    fn from(err: prometheus::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
