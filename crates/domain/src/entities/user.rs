use common::RecordId;
use serde::{Deserialize, Serialize};

use super::Entity;

/// A dashboard user. Authentication itself happens outside the core; this
/// record exists so notes and audit fields can point at an author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub password_hash: String,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    type Patch = UserPatch;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field subset merged into an existing user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}
