use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::api::response::Envelope;
use crate::http::HttpError;

/// Body of the responses that bypass the envelope.
#[derive(Serialize)]
pub struct ErrorResponse {
    detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("OPENROUTER_API_KEY not configured")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error: {0}")]
    ApiStatus(u16),

    #[error("HTTP error: {0}")]
    PageStatus(u16),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Maps a failed call to the LLM upstream.
    pub fn from_upstream(err: HttpError) -> Self {
        match err {
            HttpError::Timeout => AppError::Timeout,
            HttpError::Status(status) => AppError::ApiStatus(status),
            HttpError::Transport(msg) => AppError::Other(msg),
        }
    }

    /// Maps a failed fetch of a page being scraped.
    pub fn from_page(err: HttpError) -> Self {
        match err {
            HttpError::Status(status) => AppError::PageStatus(status),
            other => AppError::from_upstream(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingApiKey | AppError::ConfigError(_) => {
                error!("{}", self);
                let body = Json(ErrorResponse {
                    detail: self.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            _ => {
                warn!("Request failed: {}", self);
                Json(Envelope::<()>::fail(self.to_string())).into_response()
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
