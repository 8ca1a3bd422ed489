use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blog_core::ValidationError;

pub mod posts;
pub mod users;

/// Reads the leading integer of a path id: surrounding whitespace and an
/// optional sign are allowed, and anything after the digits is ignored, so
/// `1abc` and `1.5` both mean 1. No leading digits (or an out-of-range
/// value) matches no record.
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);
    if digits.is_empty() {
        return None;
    }
    trimmed[..sign_len + digits.len()].parse().ok()
}

pub(crate) fn not_found(message: &'static str) -> Response {
    (StatusCode::NOT_FOUND, message).into_response()
}

pub(crate) fn bad_request(err: ValidationError) -> Response {
    (StatusCode::BAD_REQUEST, err.message()).into_response()
}

pub async fn root() -> &'static str {
    "hola"
}

pub async fn fallback() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
