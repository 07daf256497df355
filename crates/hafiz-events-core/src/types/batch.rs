//! Notification batch
//!
//! A batch keeps the untouched inbound payload alongside its records.
//! Records stay as raw JSON until they are processed, so a record with
//! a missing or ill-typed field fails on its own instead of rejecting
//! the whole batch.

use serde_json::{json, Value};

use super::NotificationRecord;
use crate::{Error, Result};

/// Envelope keys accepted for the record array, in lookup order
const RECORDS_KEYS: &[&str] = &["Records", "records"];

/// Ordered set of notification records delivered in one invocation
#[derive(Debug, Clone)]
pub struct NotificationBatch {
    raw: Value,
    records: Vec<Value>,
}

impl NotificationBatch {
    /// Parse a batch from a JSON payload
    pub fn from_json(payload: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(payload)
            .map_err(|e| Error::MalformedBatch(format!("invalid JSON: {}", e)))?;
        Self::from_value(raw)
    }

    /// Build a batch from an already-parsed payload
    pub fn from_value(raw: Value) -> Result<Self> {
        let Some(envelope) = raw.as_object() else {
            return Err(Error::MalformedBatch(
                "payload is not a JSON object".into(),
            ));
        };

        let records = RECORDS_KEYS
            .iter()
            .find_map(|key| envelope.get(*key))
            .ok_or_else(|| Error::MalformedBatch("payload has no Records array".into()))?
            .as_array()
            .ok_or_else(|| Error::MalformedBatch("Records is not an array".into()))?
            .clone();

        Ok(Self { raw, records })
    }

    /// Build a batch from typed records
    pub fn from_records(records: &[NotificationRecord]) -> Result<Self> {
        let records = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let raw = json!({ "Records": records });
        Ok(Self { raw, records })
    }

    /// The payload exactly as received
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Records in arrival order
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
