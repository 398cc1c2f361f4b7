//! Dispatch errors.
//!
//! A missing target or a failed permission check is not an error: the view
//! answers with a flash message and a redirect. These variants are faults.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// A targeted view is routed with at most one kwarg, the primary key.
    #[error("targeted view received {0} kwargs, expected at most one")]
    TooManyKwargs(usize),

    /// A view left a required callback unimplemented.
    #[error("view does not implement {0}")]
    NotImplemented(&'static str),

    /// Loading, locking or saving the target failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A form or target could not be turned into a render context.
    #[error("render context error: {0}")]
    Context(#[from] serde_json::Error),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "admin dispatch failed");
        let body = serde_json::json!({"error": "internal server error"});
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
