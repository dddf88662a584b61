//! REST error surface: distinguishable error kinds with JSON bodies.
//!
//! Store operations themselves never fail; everything here covers the
//! boundary (unknown tool, rejected arguments, unreadable request body).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use kgraph::ToolError;

/// API-level errors, one variant per reportable kind.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("tool not found: {0}")]
    UnknownTool(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::UnknownTool(_) => "unknown-tool",
            ApiError::InvalidArguments(_) => "invalid-arguments",
            ApiError::MalformedBody(_) => "malformed-request",
            ApiError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownTool(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidArguments(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ToolError> for ApiError {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::NotFound(name) => ApiError::UnknownTool(name),
            ToolError::InvalidInput(msg) => ApiError::InvalidArguments(msg),
            ToolError::Serialization(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}
