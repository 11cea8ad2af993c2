// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .context("Failed to read config file")?;

    let config: Config = if path.extension().and_then(|s| s.to_str()) == Some("yaml")
        || path.extension().and_then(|s| s.to_str()) == Some("yml")
    {
        serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(&contents).context("Failed to parse JSON config")?
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_yaml_config() {
        let path = std::env::temp_dir().join(format!("appwatch-{}.yaml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "probe:\n  timeout_ms: 1000\n  interval_secs: 5\ninventory:\n  path: apps.json\n",
        )
        .unwrap();

        let config = load_config(&path).await.unwrap();
        assert_eq!(config.probe.timeout_ms, 1_000);
        assert_eq!(config.inventory.path, "apps.json");

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn invalid_config_fails_validation() {
        let path = std::env::temp_dir().join(format!("appwatch-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"probe":{"timeout_ms":0}}"#).unwrap();

        assert!(load_config(&path).await.is_err());

        std::fs::remove_file(&path).ok();
    }
}
