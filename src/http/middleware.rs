//! JSON body limit middleware.
//!
//! Only `application/json` bodies are read and capped; every other body
//! reaches the handlers untouched, whatever its size.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Body of a 413 rejection.
pub const PAYLOAD_TOO_LARGE: &str = "request entity too large";

/// Returns true when `Content-Type` names `application/json` (parameters ignored).
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Buffer JSON request bodies up to `limit` bytes, answering 413 beyond it.
pub async fn limit_json_body(
    State(limit): State<usize>,
    request: Request,
    next: Next,
) -> Response {
    if !is_json(request.headers()) {
        return next.run(request).await;
    }

    if declared_length(request.headers()).is_some_and(|len| len > limit as u64) {
        tracing::debug!(limit, "Rejecting oversized JSON body");
        return (StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE).into_response();
    }

    let (parts, body) = request.into_parts();
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => next.run(Request::from_parts(parts, Body::from(bytes))).await,
        Err(e) => {
            tracing::debug!(limit, error = %e, "Rejecting JSON body");
            (StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE).into_response()
        }
    }
}
