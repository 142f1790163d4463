use serde::{Deserialize, Serialize};

use crate::model::contact::ContactMessage;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessageResponse {
    pub id: String,
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

impl From<&ContactMessage> for ContactMessageResponse {
    fn from(msg: &ContactMessage) -> Self {
        ContactMessageResponse {
            id: msg.id_hex(),
            full_name: msg.full_name.clone(),
            email: msg.email.clone(),
            phone: msg.phone.clone(),
            message: msg.message.clone(),
            status: msg.status.clone(),
            created_at: msg.created_at.clone(),
            updated_at: msg.updated_at.clone(),
        }
    }
}
