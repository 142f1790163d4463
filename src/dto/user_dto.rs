use serde::{Deserialize, Serialize};

use crate::model::user::{Role, User};

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// PATCH body for the profile route. The role field is deliberately not
/// accepted here; role changes go through the admin path only.
#[derive(Debug, Deserialize)]
pub struct PatchProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
    #[serde(rename = "passportNumber")]
    pub passport_number: Option<String>,
    pub preferences: Option<String>,
}

/// Partial profile update applied with a single `$set`.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "dateOfBirth", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(rename = "passportNumber", skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
}

impl From<PatchProfileRequest> for ProfileUpdate {
    fn from(req: PatchProfileRequest) -> Self {
        ProfileUpdate {
            name: req.name,
            phone: req.phone,
            date_of_birth: req.date_of_birth,
            nationality: req.nationality,
            passport_number: req.passport_number,
            preferences: req.preferences,
        }
    }
}

/// Profile projection: everything except the password hash and the reset
/// token fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    #[serde(rename = "dateOfBirth", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(rename = "passportNumber", skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        ProfileResponse {
            id: user.id_hex(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            date_of_birth: user.date_of_birth.clone(),
            nationality: user.nationality.clone(),
            passport_number: user.passport_number.clone(),
            preferences: user.preferences.clone(),
            updated_at: user.updated_at.clone(),
        }
    }
}

/// Admin user listing entry, password excluded.
#[derive(Debug, Clone, Serialize)]
pub struct UserListItem {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl From<&User> for UserListItem {
    fn from(user: &User) -> Self {
        UserListItem {
            id: user.id_hex(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            phone: user.phone.clone(),
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
        }
    }
}
