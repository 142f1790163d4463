use serde::{Deserialize, Serialize};

use crate::model::user::{Role, User};

/// Request bodies arrive with every field optional so missing fields map to
/// the 400 responses the clients expect instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public-safe projection returned by signup.
#[derive(Debug, Clone, Serialize)]
pub struct SignupUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
}

impl From<&User> for SignupUser {
    fn from(user: &User) -> Self {
        SignupUser {
            id: user.id_hex(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            phone: user.phone.clone(),
        }
    }
}

/// Public-safe projection returned by signin.
#[derive(Debug, Clone, Serialize)]
pub struct SigninUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<&User> for SigninUser {
    fn from(user: &User) -> Self {
        SigninUser {
            id: user.id_hex(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Development-only payload carried in the forgot-password response.
#[derive(Debug, Clone, Serialize)]
pub struct ResetDebugInfo {
    #[serde(rename = "resetToken")]
    pub reset_token: String,
    #[serde(rename = "resetLink")]
    pub reset_link: String,
}
