//! Prometheus metrics for the dashboard service

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub dashboard_refresh_total: IntCounter,
    pub dashboard_refresh_failures_total: IntCounter,
    pub dashboard_levels_detected: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let dashboard_refresh_total =
            IntCounter::new("dashboard_refresh_total", "Completed dashboard refresh cycles")?;
        let dashboard_refresh_failures_total = IntCounter::new(
            "dashboard_refresh_failures_total",
            "Dashboard refresh cycles that returned an error",
        )?;
        let dashboard_levels_detected = Gauge::new(
            "dashboard_levels_detected",
            "Grouped support/resistance levels in the latest snapshot",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(dashboard_refresh_total.clone()))?;
        registry.register(Box::new(dashboard_refresh_failures_total.clone()))?;
        registry.register(Box::new(dashboard_levels_detected.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            dashboard_refresh_total,
            dashboard_refresh_failures_total,
            dashboard_levels_detected,
        })
    }

    /// Render all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
