//! Canonical taxonomy record — the generic shape all mappers read from and
//! write to. Pure value type, no DB dependency.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A taxonomy record in generic form.
///
/// Produced and consumed by [`crate::Mapper`] implementations; the dispatch
/// layer treats it as opaque apart from the [`is_empty`](Self::is_empty)
/// guard. Field payloads are arbitrary JSON so any source system's shape
/// survives the round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyEntity {
    /// Stable record identity in the source system, when known.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Human-readable name of the record.
    #[serde(default)]
    pub name: Option<String>,
    /// Generic field bag — whatever the source row carried.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, Value>,
    /// Last-modified stamp from the source system.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaxonomyEntity {
    /// Create a named record with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Some(Uuid::new_v4()),
            name: Some(name.into()),
            fields: HashMap::new(),
            updated_at: None,
        }
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// An empty record carries no identity and no data — the shape a source
    /// system hands over for a missing row. Dispatch rejects these up front.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.fields.is_empty()
    }
}
