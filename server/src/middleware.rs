//! Cross-cutting request handling: logging, JSON body parsing, panic guard.

use std::panic::AssertUnwindSafe;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use futures::FutureExt;
use serde_json::{Map, Value};
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::error::{internal_error, AppError};

/// Log every inbound request before routing.
///
/// Each request gets its own span carrying a generated `request_id`, so log
/// lines emitted by the handler (including the error handler) can be matched
/// to the request that caused them.
pub async fn log_request(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let span = info_span!("request", %request_id, %method, %path);

    info!(parent: &span, "request received");
    let started = Instant::now();
    let response = next.run(req).instrument(span.clone()).await;
    debug!(
        parent: &span,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "response sent"
    );
    response
}

/// Convert a panicking handler into the generic 500 response.
pub async fn catch_panic(req: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            error!(%detail, "handler panicked");
            internal_error()
        }
    }
}

/// JSON request body that has not been validated yet.
///
/// Unlike `axum::Json`:
/// - a request without a JSON content type reads as `{}`, so it fails field
///   validation like any other incomplete body;
/// - bad syntax or a body that is not valid JSON data becomes
///   `AppError::MalformedBody`;
/// - a body that cannot be buffered (e.g. over the size limit) keeps the
///   rejection's own status.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self(Value::Object(Map::new()))),
            Err(rejection @ JsonRejection::BytesRejection(_)) => {
                Err(AppError::BodyRejected(rejection))
            }
            Err(rejection) => Err(AppError::MalformedBody(rejection.body_text())),
        }
    }
}
