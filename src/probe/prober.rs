// src/probe/prober.rs
use crate::config::ProbeConfig;
use crate::inventory::{ApplicationRecord, Status};
use crate::metrics::MetricsCollector;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, info};
use url::Url;
use uuid::Uuid;

/// Issues health probes against application production URLs.
///
/// Every failure mode collapses to [`Status::Down`]; a probe never returns an
/// error to its caller.
#[derive(Clone)]
pub struct HealthProber {
    config: ProbeConfig,
    client: Client,
    metrics: Option<Arc<MetricsCollector>>,
}

impl HealthProber {
    pub fn new(config: ProbeConfig, metrics: Option<Arc<MetricsCollector>>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            metrics,
        }
    }

    /// Probe a single production URL.
    ///
    /// `Up` only when the endpoint answers within the timeout with HTTP 200
    /// exactly. A missing or empty URL is `Down` without a network call.
    pub async fn probe_one(&self, url: Option<&str>) -> Status {
        let raw = match url {
            Some(u) if !u.trim().is_empty() => u,
            _ => return Status::Down,
        };

        let parsed = match Url::parse(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Skipping malformed production URL {}: {}", raw, e);
                return Status::Down;
            }
        };

        let start = std::time::Instant::now();
        let result = timeout(
            self.config.timeout(),
            self.client.get(parsed.as_str()).send(),
        )
        .await;

        let status = match result {
            Ok(Ok(response)) => {
                if response.status() == StatusCode::OK {
                    Status::Up
                } else {
                    debug!("Probe of {} returned HTTP {}", parsed, response.status());
                    Status::Down
                }
            }
            Ok(Err(e)) => {
                debug!("Probe of {} failed: {}", parsed, e);
                Status::Down
            }
            Err(_) => {
                debug!(
                    "Probe of {} timed out after {:?}",
                    parsed,
                    self.config.timeout()
                );
                Status::Down
            }
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_probe(status, start.elapsed().as_secs_f64());
        }

        status
    }

    /// Probe every record's production URL concurrently and return the same
    /// records, in the same order, with `status` and `checkedAt` populated.
    ///
    /// One task per record, no concurrency cap; the call resolves only once
    /// every probe has, so the batch is bounded by the slowest single probe.
    pub async fn probe_all(&self, mut records: Vec<ApplicationRecord>) -> Vec<ApplicationRecord> {
        if records.is_empty() {
            return records;
        }

        let batch_id = Uuid::new_v4();
        let start = std::time::Instant::now();

        let mut tasks = Vec::with_capacity(records.len());
        for record in &records {
            let prober = self.clone();
            let url = record.prod_url.clone();
            tasks.push(tokio::spawn(async move {
                prober.probe_one(url.as_deref()).await
            }));
        }

        // join_all yields results in spawn order, so slot i belongs to
        // record i regardless of completion order.
        let results = futures::future::join_all(tasks).await;

        let checked_at = Utc::now();
        let mut up_count = 0;
        let mut down_count = 0;

        for (record, result) in records.iter_mut().zip(results) {
            let status = match result {
                Ok(status) => status,
                Err(e) => {
                    error!("Probe task for {} failed to join: {}", record.name, e);
                    Status::Down
                }
            };

            match status {
                Status::Up => up_count += 1,
                Status::Down => down_count += 1,
            }

            record.status = Some(status);
            record.checked_at = Some(checked_at);
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_batch(up_count, down_count);
        }

        info!(
            "Probe batch {} complete: {} up, {} down in {}ms",
            batch_id,
            up_count,
            down_count,
            start.elapsed().as_millis()
        );

        records
    }
}
