//! Error types for the HTTP surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failures while starting the server.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid listen address: {0}")]
    Addr(#[from] std::net::AddrParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A JSON error response: `{"error": ..., "message": ...}`.
#[derive(Debug, Error)]
#[error("{error}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: error.into(),
            message: message.into(),
        }
    }

    /// An unexpected failure. Logged here so handlers don't have to.
    pub fn internal(error: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        let err = Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            message: cause.to_string(),
        };
        tracing::error!("{err}");
        err
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}
