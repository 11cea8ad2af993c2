// src/config/models.rs
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("probe.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("probe.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("inventory.path must not be empty")]
    EmptyInventoryPath,

    #[error("metrics.path must start with '/': {0}")]
    InvalidMetricsPath(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub probe: ProbeConfig,
    pub inventory: InventoryConfig,
    pub metrics: MetricsConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.probe.interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.inventory.path.is_empty() {
            return Err(ConfigError::EmptyInventoryPath);
        }
        if !self.metrics.path.starts_with('/') {
            return Err(ConfigError::InvalidMetricsPath(self.metrics.path.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Per-probe timeout in milliseconds.
    pub timeout_ms: u64,
    /// Watcher re-probe period in seconds.
    pub interval_secs: u64,
    /// Probe one batch, print the annotated records as JSON, and exit.
    pub run_once: bool,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            interval_secs: 30,
            run_once: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Path to the JSON inventory file.
    pub path: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: "inventory.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9090,
            path: "/metrics".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_probe_contract() {
        let config = Config::default();
        assert_eq!(config.probe.timeout(), Duration::from_millis(5_000));
        assert_eq!(config.probe.interval(), Duration::from_secs(30));
        assert!(!config.probe.run_once);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.probe.timeout_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn metrics_path_must_be_absolute() {
        let mut config = Config::default();
        config.metrics.path = "metrics".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMetricsPath(_))
        ));
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config: Config = serde_yaml::from_str("probe:\n  timeout_ms: 250\n").unwrap();
        assert_eq!(config.probe.timeout_ms, 250);
        assert_eq!(config.probe.interval_secs, 30);
        assert_eq!(config.inventory.path, "inventory.json");
    }
}
