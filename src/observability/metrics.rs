//! Metrics collection and exposition.
//!
//! # Metrics
//! - `replicator_requests_total` (counter): inbound requests accepted for replication
//! - `replicator_forwards_total` (counter): forward outcomes by target, outcome
//! - `replicator_forward_duration_seconds` (histogram): per-target latency

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::forwarding::ForwardOutcome;

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request() {
    metrics::counter!("replicator_requests_total").increment(1);
}

pub fn record_forward(outcome: &ForwardOutcome, elapsed: Duration) {
    let target = outcome.target().to_string();

    metrics::counter!(
        "replicator_forwards_total",
        "target" => target.clone(),
        "outcome" => outcome.label()
    )
    .increment(1);

    metrics::histogram!("replicator_forward_duration_seconds", "target" => target)
        .record(elapsed.as_secs_f64());
}
