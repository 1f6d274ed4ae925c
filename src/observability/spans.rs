//! Per-request tracing spans.

use axum::{body::Body, http::Request};
use tracing::Span;

use crate::http::request::X_REQUEST_ID;

/// Span for one HTTP request, carrying its correlation ID.
///
/// Used as the `make_span_with` callback of the `TraceLayer`, which sits
/// inside the layer that assigns request IDs.
pub fn http_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
