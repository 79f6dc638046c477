//! Route handlers.

use axum::{
    extract::RawQuery,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::request::{parse_query, resolve};
use crate::http::response;

/// `GET /`
pub async fn root() -> &'static str {
    response::HELLO_WORLD
}

/// `GET /me`
pub async fn me() -> &'static str {
    response::IDENTITY
}

/// `GET /usr`: greet the caller named by `?username=` or the `username` header.
pub async fn greet_user(RawQuery(raw): RawQuery, headers: HeaderMap) -> Response {
    let query = parse_query(raw.as_deref());
    match resolve(&query, &headers, "username") {
        Some(username) => response::greeting(&username).into_response(),
        None => {
            tracing::debug!("Rejecting /usr request without username");
            (StatusCode::UNAUTHORIZED, response::NO_USERNAME).into_response()
        }
    }
}

/// Answers requests whose path matched but whose method did not.
///
/// Produces the same bare 404 the router gives unknown paths.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
