use common::RecordId;
use serde::{Deserialize, Serialize};

use super::Entity;

/// A free-form note attached to exactly one customer, shipment or partial
/// shipment via the owner's `noteId`. Never shared between owners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Ordered list of opaque image references, stored verbatim.
    #[serde(default)]
    pub images: Vec<String>,
    /// The authoring user, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
}

impl Entity for Note {
    const TABLE: &'static str = "notes";
    type Patch = NotePatch;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field subset merged into an existing note. A supplied images list
/// replaces the stored list, never merges into it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
}
