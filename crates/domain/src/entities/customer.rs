use common::RecordId;
use serde::{Deserialize, Serialize};

use super::Entity;

/// JSON field holding the running balance; mutated only through atomic
/// store increments.
pub const FIELD_BALANCE: &str = "balance";

/// A customer with a running signed balance.
///
/// The balance is a derived running total: it never appears in
/// [`CustomerPatch`] and moves only through the store's atomic increment, so
/// concurrent adjustments cannot lose updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: RecordId,
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default)]
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}

impl Entity for Customer {
    const TABLE: &'static str = "customers";
    type Patch = CustomerPatch;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field subset merged into an existing customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<RecordId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_optionals_are_omitted_from_the_record() {
        let customer = Customer {
            id: RecordId::new(1),
            name: "Ada".to_string(),
            phone: "0800".to_string(),
            address: "12 Marina".to_string(),
            origin: None,
            balance: 0.0,
            note_id: None,
            created_by_user_id: None,
            updated_by_user_id: None,
        };

        let value = serde_json::to_value(&customer).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("origin"));
        assert!(!object.contains_key("noteId"));
        assert!(!object.contains_key("createdByUserId"));
        assert_eq!(object["balance"], serde_json::json!(0.0));
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = CustomerPatch {
            phone: Some("0900".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["phone"], "0900");
    }
}
