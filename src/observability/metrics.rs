use std::time::Duration;

use prometheus::{Encoder, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub ledger_operations_total: IntCounterVec,
    pub operation_latency_seconds: HistogramVec,
    pub live_requests: IntGauge,
    pub drivers_available: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let ledger_operations_total = IntCounterVec::new(
            Opts::new(
                "ledger_operations_total",
                "Total ledger operations by outcome",
            ),
            &["operation", "outcome"],
        )
        .expect("valid ledger_operations_total metric");

        let operation_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "operation_latency_seconds",
                "Latency of ledger operations in seconds",
            ),
            &["operation"],
        )
        .expect("valid operation_latency_seconds metric");

        let live_requests = IntGauge::new(
            "live_requests",
            "Requests currently in a non-terminal status",
        )
        .expect("valid live_requests metric");

        let drivers_available = IntGauge::new(
            "drivers_available",
            "Drivers idle with no request in progress",
        )
        .expect("valid drivers_available metric");

        registry
            .register(Box::new(ledger_operations_total.clone()))
            .expect("register ledger_operations_total");
        registry
            .register(Box::new(operation_latency_seconds.clone()))
            .expect("register operation_latency_seconds");
        registry
            .register(Box::new(live_requests.clone()))
            .expect("register live_requests");
        registry
            .register(Box::new(drivers_available.clone()))
            .expect("register drivers_available");

        Self {
            registry,
            ledger_operations_total,
            operation_latency_seconds,
            live_requests,
            drivers_available,
        }
    }

    pub fn record_operation(&self, operation: &str, outcome: &str, elapsed: Duration) {
        self.ledger_operations_total
            .with_label_values(&[operation, outcome])
            .inc();
        self.operation_latency_seconds
            .with_label_values(&[operation])
            .observe(elapsed.as_secs_f64());
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
