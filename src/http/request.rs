//! Request inspection helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Parse the query string, keeping undecodable components raw
//! - Resolve client-supplied values from the query string, then headers
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An empty value is treated the same as a missing one
//! - Header bytes outside visible ASCII are read as Latin-1, never dropped

use std::borrow::Cow;
use std::collections::HashMap;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use percent_encoding::percent_decode_str;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a fresh UUID v4 request ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}

/// Parse a raw query string into a map. Repeated keys keep the last value.
///
/// `+` becomes a space and `%XX` escapes are decoded. A component with a
/// malformed escape, or one that does not decode to UTF-8, is kept as written.
pub fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in raw.unwrap_or_default().split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key);
        if key.is_empty() {
            continue;
        }
        params.insert(key, decode_component(value));
    }
    params
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    if has_malformed_escape(&spaced) {
        return spaced;
    }
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

fn has_malformed_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

fn header_text(value: &HeaderValue) -> Cow<'_, str> {
    match value.to_str() {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(value.as_bytes().iter().map(|&b| char::from(b)).collect()),
    }
}

/// Look up `key` in the query parameters, falling back to the headers.
///
/// Returns the first non-empty value. A query parameter that is present but
/// empty does not shadow the header. Header names compare case-insensitively.
pub fn resolve<'a>(
    query: &'a HashMap<String, String>,
    headers: &'a HeaderMap,
    key: &str,
) -> Option<Cow<'a, str>> {
    query
        .get(key)
        .filter(|v| !v.is_empty())
        .map(|v| Cow::Borrowed(v.as_str()))
        .or_else(|| {
            headers
                .get(key)
                .map(header_text)
                .filter(|v| !v.is_empty())
        })
}
