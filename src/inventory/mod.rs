// src/inventory/mod.rs
mod record;

pub use record::{ApplicationRecord, Status};

use anyhow::{Context, Result};
use std::path::Path;

/// Load application records from a JSON inventory file (an array of
/// application documents).
pub async fn load_inventory<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicationRecord>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read inventory file {}", path.display()))?;

    let records: Vec<ApplicationRecord> =
        serde_json::from_str(&contents).context("Failed to parse inventory JSON")?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}-{}.json", name, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn loads_record_array() {
        let path = temp_path("inventory");
        std::fs::write(
            &path,
            r#"[{"name":"billing","prodUrl":"https://billing.internal"},{"name":"legacy"}]"#,
        )
        .unwrap();

        let records = load_inventory(&path).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "billing");
        assert!(records[1].prod_url.is_none());

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let err = load_inventory("/nonexistent/inventory.json")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read inventory file"));
    }

    #[tokio::test]
    async fn non_array_payload_is_an_error() {
        let path = temp_path("inventory-bad");
        std::fs::write(&path, r#"{"name":"billing"}"#).unwrap();

        let err = load_inventory(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse inventory JSON"));

        std::fs::remove_file(&path).ok();
    }
}
