use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub refreshes_total: IntCounterVec,
    pub refreshes_coalesced_total: IntCounter,
    pub active_orders: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let refreshes_total = IntCounterVec::new(
            Opts::new("refreshes_total", "Order snapshot refreshes by trigger and outcome"),
            &["trigger", "outcome"],
        )
        .expect("valid refreshes_total metric");

        let refreshes_coalesced_total = IntCounter::new(
            "refreshes_coalesced_total",
            "Refresh triggers skipped because one was already in flight",
        )
        .expect("valid refreshes_coalesced_total metric");

        let active_orders = IntGauge::new("active_orders", "Non-terminal orders in the last snapshot")
            .expect("valid active_orders metric");

        registry
            .register(Box::new(refreshes_total.clone()))
            .expect("register refreshes_total");
        registry
            .register(Box::new(refreshes_coalesced_total.clone()))
            .expect("register refreshes_coalesced_total");
        registry
            .register(Box::new(active_orders.clone()))
            .expect("register active_orders");

        Self {
            registry,
            refreshes_total,
            refreshes_coalesced_total,
            active_orders,
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
