// src/probe/watcher.rs
use crate::config::ProbeConfig;
use crate::inventory::ApplicationRecord;
use crate::probe::HealthProber;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::time::interval;
use tracing::info;

/// Re-probes a fixed inventory on an interval and publishes the latest
/// annotated snapshot.
pub struct ProbeWatcher {
    config: ProbeConfig,
    prober: HealthProber,
    records: Vec<ApplicationRecord>,
    latest: ArcSwap<Vec<ApplicationRecord>>,
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl ProbeWatcher {
    pub fn new(config: ProbeConfig, prober: HealthProber, records: Vec<ApplicationRecord>) -> Self {
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

        Self {
            config,
            prober,
            records,
            latest: ArcSwap::from_pointee(Vec::new()),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// The most recent annotated snapshot. Empty until the first batch
    /// completes.
    pub fn latest(&self) -> Arc<Vec<ApplicationRecord>> {
        self.latest.load_full()
    }

    pub async fn start(self: Arc<Self>) {
        let mut interval = interval(self.config.interval());
        let mut shutdown_rx = self.shutdown_rx.clone();

        info!(
            "Starting probe watcher with interval: {:?}",
            self.config.interval()
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let annotated = self.prober.probe_all(self.records.clone()).await;
                    self.latest.store(Arc::new(annotated));
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Probe watcher shutting down");
                        break;
                    }
                }
            }
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
