use anyhow::Result;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_TRANSPORT: &str = "transport_error";
pub const OUTCOME_REJECTED: &str = "rejected";

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the process metrics.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token metrics
    pub token_exchanges: IntCounterVec,
    pub token_cache_hits: IntCounter,

    // Service call metrics
    pub service_requests: IntCounterVec,
    pub service_request_duration: HistogramVec,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("cloudconnector".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            token_exchanges: IntCounterVec::new(Opts::new("token_exchanges_total", "Token exchanges by outcome"),&["outcome"],).unwrap(),
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Requests served with a cached token").unwrap(),

            service_requests: IntCounterVec::new(Opts::new("service_requests_total", "Service calls by method and status"),&["method", "status"],).unwrap(),
            service_request_duration: HistogramVec::new(HistogramOpts::new("service_request_duration_seconds", "Service call duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 15.0]),&["method"],).unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_exchanges.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.service_requests.clone())).unwrap();
        reg.register(Box::new(metrics.service_request_duration.clone())).unwrap();

        metrics
    }

    /// Prometheus text exposition of everything registered.
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
