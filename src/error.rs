use crate::config::ConfigError;
use crate::profile::ProfileError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
    #[error("analysis error: {0}")]
    Analysis(#[from] ProfileError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Analysis failures keep the bare `{"error": ...}` shape of the report contract.
            AppError::Analysis(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
            other => {
                let body = Json(json!({ "error": other.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
