//! Centralized error translation for the HTTP layer.
//!
//! Handlers return `Result<Response, AppError>` and use `?` on repository
//! calls, so every unexpected failure ends up in `IntoResponse for AppError`.
//! The response body is always a fixed message; the cause only goes to the
//! log.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blog_core::StoreError;
use thiserror::Error;
use tracing::{error, warn};

const INTERNAL_ERROR_BODY: &str = "Internal Server Error";
const MALFORMED_BODY: &str = "Malformed JSON body";

/// Failures that short-circuit a handler.
#[derive(Debug, Error)]
pub enum AppError {
    /// The store failed for a reason other than a missing record.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body was not readable as JSON.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The body could not be read at all; answered with the rejection's own
    /// status (413 for an oversized body).
    #[error("request body rejected: {0}")]
    BodyRejected(JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Store(err) => {
                error!(error = %err, "request failed");
                internal_error()
            }
            AppError::MalformedBody(detail) => {
                warn!(%detail, "rejected request body");
                (StatusCode::BAD_REQUEST, MALFORMED_BODY).into_response()
            }
            AppError::BodyRejected(rejection) => {
                warn!(status = rejection.status().as_u16(), %rejection, "rejected request body");
                rejection.into_response()
            }
        }
    }
}

/// The generic 500 response shared by the error handler and the panic guard.
pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}
