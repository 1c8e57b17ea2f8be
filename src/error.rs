//! Typed errors and HTTP mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid server mode: {0} (expected books, pets or proxy)")]
    InvalidMode(String),
    #[error("invalid schema: {0} (expected books or pets)")]
    InvalidSchema(String),
    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
    #[error("invalid seed record at index {index}: {reason}")]
    InvalidSeed { index: usize, reason: String },
    #[error("duplicate seed key: {0}")]
    DuplicateKey(String),
    #[error("seed load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("invalid json")]
    MalformedPayload(#[source] serde_json::Error),
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("{0}")]
    Conflict(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("{context}: {source}")]
    Upstream {
        context: String,
        #[source]
        source: reqwest::Error,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::MalformedPayload(_) | AppError::PayloadTooLarge => {
                StatusCode::BAD_REQUEST
            }
            // Key collisions on create are reported as 403, not 409.
            AppError::Conflict(_) => StatusCode::FORBIDDEN,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        match self {
            AppError::Upstream { .. } => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                self.to_string(),
            )
                .into_response(),
            _ => (status, Json(ErrorBody { error: self.to_string() })).into_response(),
        }
    }
}
