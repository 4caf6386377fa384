//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): total requests by method, status
//! - `api_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed, so the library
//!   and its tests never need one

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint started"),
        Err(err) => tracing::error!(error = %err, "failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, started: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("api_requests_total", &labels).increment(1);
    metrics::histogram!("api_request_duration_seconds", &labels)
        .record(started.elapsed().as_secs_f64());
}
