//! Router assembly.
//!
//! ```text
//! /health                 → health
//! /api/session            → session
//! /api/score              → score
//! /api/leaderboard        → leaderboard
//! /api/admin              → admin
//! /api/catering           → catering
//! /api/visit, visit-stats → visits
//! ```

use axum::{
    Router,
    http::{self, HeaderValue, header::CACHE_CONTROL},
};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

/// Request bodies are small JSON documents.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

pub fn build(state: AppState) -> Router {
    // Request ID header name
    let x_request_id = http::HeaderName::from_static("x-request-id");

    Router::new()
        .nest("/health", handlers::health::router())
        .nest("/api/session", handlers::session::router())
        .nest("/api/score", handlers::score::router())
        .nest("/api/leaderboard", handlers::leaderboard::router())
        .nest("/api/admin", handlers::admin::router())
        .nest("/api/catering", handlers::catering::router())
        .nest("/api", handlers::visits::router())
        .with_state(state)
        // Responses are per-caller
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Request ID: generate UUID, include in logs, return in response
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &http::Request<axum::body::Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            },
        ))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}
