// src/metrics/collector.rs
use crate::inventory::Status;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Vec<u8> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap();
        buffer
    }
}

pub struct MetricsCollector {
    // Probe metrics
    pub probes_total: IntCounterVec,
    pub probe_duration_seconds: Histogram,
    pub probe_batches_total: IntCounter,

    // Inventory metrics
    pub apps_up: IntGauge,
    pub apps_down: IntGauge,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let probes_total = IntCounterVec::new(
            Opts::new("appwatch_probes_total", "Total number of health probes"),
            &["outcome"],
        )?;
        registry.register(Box::new(probes_total.clone()))?;

        let probe_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "appwatch_probe_duration_seconds",
            "Health probe duration in seconds",
        ))?;
        registry.register(Box::new(probe_duration_seconds.clone()))?;

        let probe_batches_total = IntCounter::new(
            "appwatch_probe_batches_total",
            "Total number of completed probe batches",
        )?;
        registry.register(Box::new(probe_batches_total.clone()))?;

        let apps_up = IntGauge::new("appwatch_apps_up", "Applications marked up in the last batch")?;
        registry.register(Box::new(apps_up.clone()))?;

        let apps_down = IntGauge::new(
            "appwatch_apps_down",
            "Applications marked down in the last batch",
        )?;
        registry.register(Box::new(apps_down.clone()))?;

        Ok(Self {
            probes_total,
            probe_duration_seconds,
            probe_batches_total,
            apps_up,
            apps_down,
        })
    }

    pub fn record_probe(&self, status: Status, duration_secs: f64) {
        self.probes_total
            .with_label_values(&[status.as_str()])
            .inc();
        self.probe_duration_seconds.observe(duration_secs);
    }

    pub fn record_batch(&self, up: usize, down: usize) {
        self.probe_batches_total.inc();
        self.apps_up.set(up as i64);
        self.apps_down.set(down as i64);
    }
}
