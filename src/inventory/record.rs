// src/inventory/record.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Binary health classification assigned to a record after probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Up,
    Down,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Up => "up",
            Status::Down => "down",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One application document from the inventory.
///
/// Only `prodUrl` (input) and `status`/`checkedAt` (output) matter to the
/// prober; every other attribute (owners, domain, storage ids, ...) is
/// carried through untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "prodUrl", default, skip_serializing_if = "Option::is_none")]
    pub prod_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    #[serde(rename = "checkedAt", default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApplicationRecord {
    pub fn new(name: impl Into<String>, prod_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            prod_url,
            status: None,
            checked_at: None,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&Status::Down).unwrap(), "\"down\"");
    }

    #[test]
    fn unknown_attributes_round_trip() {
        let doc = serde_json::json!({
            "_id": "66f0a1",
            "name": "billing",
            "prodUrl": "https://billing.internal",
            "owners": ["ops"],
            "domain": "finance"
        });

        let record: ApplicationRecord = serde_json::from_value(doc).unwrap();
        assert_eq!(record.name, "billing");
        assert_eq!(record.prod_url.as_deref(), Some("https://billing.internal"));
        assert_eq!(record.extra["_id"], "66f0a1");
        assert_eq!(record.extra["domain"], "finance");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["owners"], serde_json::json!(["ops"]));
    }

    #[test]
    fn missing_url_and_status_parse_as_none() {
        let record: ApplicationRecord =
            serde_json::from_value(serde_json::json!({ "name": "legacy" })).unwrap();
        assert!(record.prod_url.is_none());
        assert!(record.status.is_none());
        assert!(record.checked_at.is_none());
    }
}
