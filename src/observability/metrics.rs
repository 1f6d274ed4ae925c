//! Metrics collection and exposition.
//!
//! # Metrics
//! - `converter_requests_total` (counter): conversions by outcome, gender
//! - `converter_request_duration_seconds` (histogram): handler latency by outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - No user-supplied strings as labels (bounded cardinality)

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Outcome label for a `/convert` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Converted,
    MissingField,
    Malformed,
    NoMatch,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Converted => "converted",
            Outcome::MissingField => "missing_field",
            Outcome::Malformed => "malformed",
            Outcome::NoMatch => "no_match",
        }
    }
}

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one `/convert` request.
pub fn record_conversion(outcome: Outcome, gender: Option<&'static str>, start: Instant) {
    counter!(
        "converter_requests_total",
        "outcome" => outcome.as_str(),
        "gender" => gender.unwrap_or("none")
    )
    .increment(1);

    histogram!(
        "converter_request_duration_seconds",
        "outcome" => outcome.as_str()
    )
    .record(start.elapsed().as_secs_f64());
}
