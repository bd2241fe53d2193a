use serde::Serialize;
use axum::Json;
use axum::response::{IntoResponse, Response};

use crate::error::Result;

/// Uniform body of every API endpoint except `/health`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Renders a handler outcome. Failures go through `AppError`'s own rendering,
/// which envelopes everything except configuration and validation errors.
pub fn respond<T: Serialize>(result: Result<T>) -> Response {
    match result {
        Ok(data) => Json(Envelope::ok(data)).into_response(),
        Err(err) => err.into_response(),
    }
}
