//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Wraps every request in an `INFO` span carrying its method, URI and HTTP
/// version, and logs the status and latency (ms) when the response is sent.
///
/// A redirect hit and a shorten call log as:
///
/// ```text
/// INFO request{method=GET uri=/0LQfXx version=HTTP/1.1}: finished processing request latency=1 ms status=301
/// INFO request{method=POST uri=/shorten version=HTTP/1.1}: finished processing request latency=4 ms status=201
/// ```
///
/// `GET /health` is traced the same way. Applied outside the task drain layer
/// in `routes::router`, so time spent settling background cache work is part
/// of the reported latency.
pub fn layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
