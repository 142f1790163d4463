use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Inbound contact-form message, stored for later admin review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl ContactMessage {
    pub fn id_hex(&self) -> String {
        self.id.as_ref().map(|id| id.to_hex()).unwrap_or_default()
    }
}
