//! Prometheus metrics for request latency and store activity.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Items created counter metric name.
pub const METRIC_ITEMS_CREATED: &str = "items_created_total";
/// Items updated counter metric name.
pub const METRIC_ITEMS_UPDATED: &str = "items_updated_total";
/// Items deleted counter metric name.
pub const METRIC_ITEMS_DELETED: &str = "items_deleted_total";
/// Validation failures counter metric name.
pub const METRIC_VALIDATION_FAILURES: &str = "validation_failures_total";
/// Not-found lookups counter metric name.
pub const METRIC_NOT_FOUND: &str = "not_found_total";

/// Install the global Prometheus recorder and describe all metrics.
///
/// Call this once at startup; the returned handle renders the exposition text.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_ITEMS_CREATED, "Total number of items created");
    describe_counter!(METRIC_ITEMS_UPDATED, "Total number of items updated");
    describe_counter!(METRIC_ITEMS_DELETED, "Total number of items deleted");
    describe_counter!(
        METRIC_VALIDATION_FAILURES,
        "Total number of requests rejected by validation"
    );
    describe_counter!(
        METRIC_NOT_FOUND,
        "Total number of lookups for ids that do not exist"
    );

    debug!("Metrics initialized");
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// Increment items created counter.
pub fn inc_items_created() {
    counter!(METRIC_ITEMS_CREATED).increment(1);
}

/// Increment items updated counter.
pub fn inc_items_updated() {
    counter!(METRIC_ITEMS_UPDATED).increment(1);
}

/// Increment items deleted counter.
pub fn inc_items_deleted() {
    counter!(METRIC_ITEMS_DELETED).increment(1);
}

/// Increment validation failures counter.
pub fn inc_validation_failures() {
    counter!(METRIC_VALIDATION_FAILURES).increment(1);
}

/// Increment not-found counter.
pub fn inc_not_found() {
    counter!(METRIC_NOT_FOUND).increment(1);
}

/// RAII guard that records request latency for an endpoint when dropped.
pub struct RequestTimer {
    start: Instant,
    endpoint: &'static str,
}

impl RequestTimer {
    /// Start timing a request to `endpoint`.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        record_http_latency(self.start, self.endpoint);
    }
}
