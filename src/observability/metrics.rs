//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirector_requests_total` (counter): requests by outcome
//!   (`upgraded`, `redirected`, `not_found`, `lookup_failed`, `bad_request`)
//! - `redirector_request_duration_seconds` (histogram): latency by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Must run inside a tokio runtime; the exporter spawns onto it.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "redirector_requests_total",
                "Requests handled, labeled by outcome"
            );
            describe_histogram!(
                "redirector_request_duration_seconds",
                "Request latency in seconds, labeled by outcome"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to install metrics exporter");
        }
    }
}

/// Record one handled request.
pub fn record_request(outcome: &'static str, start_time: Instant) {
    counter!("redirector_requests_total", "outcome" => outcome).increment(1);
    histogram!("redirector_request_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}
