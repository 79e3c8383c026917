//! Metrics collection and exposition.
//!
//! # Metrics
//! - `carbon_status_checks_total` (counter): status reads by result
//!   (`retired`, `active`, `failed`)
//! - `carbon_retirements_total` (counter): retire attempts by outcome
//!   (`success`, `failed`, `busy`, `no_signer`)
//! - `carbon_credits_tracked` (gauge): credits in the last reconciled list
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_status_check(result: &'static str) {
    ::metrics::counter!("carbon_status_checks_total", "result" => result).increment(1);
}

pub fn record_retirement(outcome: &'static str) {
    ::metrics::counter!("carbon_retirements_total", "outcome" => outcome).increment(1);
}

pub fn record_credits_tracked(count: usize) {
    ::metrics::gauge!("carbon_credits_tracked").set(count as f64);
}
