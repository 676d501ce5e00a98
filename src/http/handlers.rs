//! Request handlers.
//!
//! # Responses
//! - `/`, `/health`: 200 with a fixed liveness body
//! - any other path: 302 to the resolved value, or 404
//!
//! Lookup error kinds go to logs and metrics only; every failed lookup
//! looks the same to the client. The whole request path, leading `/`
//! included, is decoded here and resolved exactly as
//! [`Document::lookup`](crate::document::Document::lookup) would.

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;

pub const HEALTH_BODY: &str = "Health is good!";

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, &'static str) {
    state.span.in_scope(|| tracing::debug!("Health check"));
    (StatusCode::OK, HEALTH_BODY)
}

/// Resolve the request path against the current mapping and redirect.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    state.span.in_scope(|| {
        let path = match percent_decode_str(uri.path()).decode_utf8() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    raw_path = %uri.path(),
                    error = %e,
                    "Request path is not valid UTF-8"
                );
                metrics::record_lookup("invalid_path", start);
                return not_found();
            }
        };

        tracing::info!(request_id = %request_id, query = %path, "Request received");

        let snapshot = state.store.current();
        let target = match snapshot.document.lookup(&path) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    query = %path,
                    kind = e.kind(),
                    error = %e,
                    "Failed to resolve path"
                );
                metrics::record_lookup(e.kind(), start);
                return not_found();
            }
        };

        let location = match HeaderValue::from_bytes(target.as_bytes()) {
            Ok(location) => location,
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    query = %path,
                    error = %e,
                    "Resolved value is not a valid Location header"
                );
                metrics::record_lookup("invalid_target", start);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target")
                    .into_response();
            }
        };

        tracing::debug!(request_id = %request_id, answer = %target, "Resolved path");
        metrics::record_lookup("redirect", start);
        (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
    })
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
