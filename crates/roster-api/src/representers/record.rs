//! Record representer
//!
//! Shapes a `UserRecord` the way clients expect it: camelCase keys and
//! `photoUrl` as an empty string when there is no photo.

use roster_core::Id;
use roster_models::UserRecord;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRepresentation {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    pub role: String,
    pub status: String,
    pub teams: Vec<String>,
    pub photo_url: String,
}

impl From<UserRecord> for RecordRepresentation {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            username: record.username,
            email: record.email,
            role: record.role,
            status: record.status,
            teams: record.teams,
            photo_url: record.attachment_ref.unwrap_or_default(),
        }
    }
}
