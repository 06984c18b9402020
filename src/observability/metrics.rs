//! Metrics collection and exposition.
//!
//! # Metrics
//! - `employee_bff_requests_total` (counter): inbound requests by method, route, status
//! - `employee_bff_request_duration_seconds` (histogram): inbound latency
//! - `employee_bff_upstream_requests_total` (counter): upstream calls by operation, outcome
//! - `employee_bff_upstream_request_duration_seconds` (histogram): upstream latency
//!
//! Recording goes through the `metrics` facade and is a no-op until an
//! exporter is installed.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "employee_bff_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "employee_bff_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "employee_bff_upstream_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("employee_bff_upstream_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Middleware recording every inbound request.
///
/// Uses the matched route template so ids do not explode label cardinality.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
