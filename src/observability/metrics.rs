//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_config_reloads_total` (counter): applied hot reloads
//! - `gateway_plugins_enabled` (gauge): size of the active plugin list
//! - `gateway_admin_requests_total` (counter): admin requests by path, status
//! - `gateway_admin_request_duration_seconds` (histogram): admin latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_config_reload() {
    ::metrics::counter!("gateway_config_reloads_total").increment(1);
}

pub fn record_plugins_enabled(count: usize) {
    ::metrics::gauge!("gateway_plugins_enabled").set(count as f64);
}

pub fn record_admin_request(path: &str, status: u16, start: Instant) {
    let status = status.to_string();
    ::metrics::counter!(
        "gateway_admin_requests_total",
        "path" => path.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    ::metrics::histogram!(
        "gateway_admin_request_duration_seconds",
        "path" => path.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}
