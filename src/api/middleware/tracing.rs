//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for every HTTP request.
///
/// Spans carry method, URI and HTTP version at `INFO`. Responses are logged
/// with status and latency in milliseconds; 5xx responses additionally at
/// `ERROR`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/brewer/edit/1 version=HTTP/1.1}: finished processing request latency=12 ms status=303
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}
