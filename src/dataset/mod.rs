pub mod client;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// One row of the configuration dataset.
///
/// The record is externally owned and kept opaque: the engine only reads
/// string fields by name. Non-string values read as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigRecord {
    fields: HashMap<String, Value>,
}

impl ConfigRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Read a slot-scoped field following the `PREFIX_n` naming scheme.
    pub fn slot_field(&self, prefix: &str, slot: u8) -> Option<&str> {
        self.get(&format!("{prefix}_{slot}"))
    }

    /// Column names present on the record, for field-mapping diagnostics.
    pub fn columns(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Set a field. Used by tests and headless hosts.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.insert(field.into(), Value::String(value.into()));
        self
    }
}

// ── Query wire types ────────────────────────────────────────────────────────

/// Range filter applied to a dataset search. Equality passes the same
/// value on both ends.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub field: String,
    pub initial_value: String,
    pub final_value: String,
    pub match_type: MatchType,
}

impl Constraint {
    pub fn equals(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            initial_value: value.to_string(),
            final_value: value.to_string(),
            match_type: MatchType::Must,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Must,
    Should,
    MustNot,
}

#[derive(Debug, Serialize)]
pub struct DatasetRequest<'a> {
    pub name: &'a str,
    pub fields: &'a [&'a str],
    pub constraints: &'a [Constraint],
    pub order: &'a [&'a str],
}

#[derive(Debug, Default, Deserialize)]
pub struct DatasetPayload {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub values: Vec<ConfigRecord>,
}

/// Source of the raw configuration record for a named widget instance.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch(&self, widget_id: &str) -> Result<ConfigRecord>;
}
