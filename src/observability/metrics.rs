use prometheus::{
    Encoder, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub solicitudes_created_total: IntCounterVec,
    pub validation_failures_total: IntCounterVec,
    pub suggestion_lookups_total: IntCounterVec,
    pub suggestion_latency_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let solicitudes_created_total = IntCounterVec::new(
            Opts::new("solicitudes_created_total", "Requests created by kind"),
            &["tipo"],
        )
        .expect("valid solicitudes_created_total metric");

        let validation_failures_total = IntCounterVec::new(
            Opts::new(
                "validation_failures_total",
                "Submissions rejected by validation, by kind",
            ),
            &["tipo"],
        )
        .expect("valid validation_failures_total metric");

        let suggestion_lookups_total = IntCounterVec::new(
            Opts::new(
                "suggestion_lookups_total",
                "Address suggestion lookups by outcome",
            ),
            &["outcome"],
        )
        .expect("valid suggestion_lookups_total metric");

        let suggestion_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "suggestion_latency_seconds",
                "Latency of address suggestion lookups in seconds",
            ),
            &["outcome"],
        )
        .expect("valid suggestion_latency_seconds metric");

        registry
            .register(Box::new(solicitudes_created_total.clone()))
            .expect("register solicitudes_created_total");
        registry
            .register(Box::new(validation_failures_total.clone()))
            .expect("register validation_failures_total");
        registry
            .register(Box::new(suggestion_lookups_total.clone()))
            .expect("register suggestion_lookups_total");
        registry
            .register(Box::new(suggestion_latency_seconds.clone()))
            .expect("register suggestion_latency_seconds");

        Self {
            registry,
            solicitudes_created_total,
            validation_failures_total,
            suggestion_lookups_total,
            suggestion_latency_seconds,
        }
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

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
