use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Body not found")]
    BodyNotFound { name: String },
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BodyNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BodyNotFound { name } => tracing::debug!(%name, "unknown body requested"),
            ApiError::InvalidBody(e) => tracing::debug!("rejected request body: {e}"),
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
