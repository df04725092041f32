use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// A schemaless record: named fields holding JSON values.
///
/// Records carry no schema of their own; the typed layer above decides what
/// the fields mean. Partial updates merge field-by-field, so a patch record
/// containing only the fields to change leaves everything else untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes any serializable value into a record.
    ///
    /// Fails if the value does not serialize to a JSON object.
    pub fn encode<T: Serialize>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(<serde_json::Error as serde::de::Error>::custom(format!(
                "record must be a JSON object, got {other}"
            ))
            .into()),
        }
    }

    /// Decodes the record into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    /// Merges the patch's fields into this record, overwriting on collision.
    /// Fields absent from the patch are untouched.
    pub fn merge(&mut self, patch: Record) {
        for (field, value) in patch.0 {
            self.0.insert(field, value);
        }
    }

    /// Adds `delta` to a numeric field, treating a missing or non-numeric
    /// field as 0.
    pub fn add_to_field(&mut self, field: &str, delta: f64) {
        let current = self.get_f64(field).unwrap_or(0.0);
        let next = current + delta;
        if let Some(number) = serde_json::Number::from_f64(next) {
            self.0.insert(field.to_string(), Value::Number(number));
        }
    }

    /// Sets a single field.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Returns a field's raw value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a numeric field as `f64`.
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }

    /// Returns a numeric field as `i64`.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.0.get(field).and_then(Value::as_i64)
    }

    /// Returns a string field.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names present in the record.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}
