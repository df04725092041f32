use serde::{Deserialize, Serialize};

/// Primary key of a record within one table.
///
/// Wraps the store-allocated integer to keep record keys from being mixed
/// up with counts or other numeric values. Keys are positive and unique per
/// table, never across tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Creates a record id from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_preserves_value() {
        let id = RecordId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn record_id_ordering() {
        assert!(RecordId::new(1) < RecordId::new(2));
    }

    #[test]
    fn record_id_serializes_as_plain_integer() {
        let id = RecordId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
