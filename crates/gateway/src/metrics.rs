use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use std::time::Duration;

/// Request outcome label attached to every metric point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ClientError,
    ServerError,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::ClientError => "client_error",
            Outcome::ServerError => "server_error",
        }
    }
}

/// Instruments on the global meter; no-ops until a meter provider is
/// installed by `common::TelemetryGuard`.
#[derive(Clone)]
pub struct RequestMetrics {
    duration: Histogram<f64>,
    requests: Counter<u64>,
}

impl RequestMetrics {
    pub fn new(meter_name: &'static str) -> Self {
        let meter = global::meter(meter_name);
        let latency_buckets = [
            0.01, 0.025, 0.05, 0.075, 0.1, 0.15, 0.2, 0.3, 0.5, 0.75, 1.0, 2.0, 5.0,
        ];

        let duration = meter
            .f64_histogram("predict_duration_seconds")
            .with_description("Time to serve one prediction (decode + infer + heatmap)")
            .with_unit("s")
            .with_boundaries(latency_buckets.to_vec())
            .build();
        let requests = meter
            .u64_counter("predict_requests_total")
            .with_description("Total prediction requests by outcome")
            .build();

        Self { duration, requests }
    }

    pub fn record(&self, elapsed: Duration, outcome: Outcome) {
        let attributes = [KeyValue::new("outcome", outcome.as_str())];
        self.duration.record(elapsed.as_secs_f64(), &attributes);
        self.requests.add(1, &attributes);
    }
}
