use std::env;
use tracing::error;

use crate::config::ConfigError;

/// Bootstrap credentials for the first ADMIN account, seeded at startup
/// when no user with the configured email exists.
#[derive(Debug, Clone)]
pub struct AdminUserConfig {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

impl AdminUserConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let email = env::var("ADMIN_EMAIL")
            .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_EMAIL".to_string()))?;
        let password = env::var("ADMIN_PASSWORD")
            .map_err(|_| ConfigError::EnvVarNotFound("ADMIN_PASSWORD".to_string()))?;
        let name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());
        let phone = env::var("ADMIN_PHONE").ok();

        if password.len() < 6 {
            error!("ADMIN_PASSWORD is shorter than 6 characters");
            return Err(ConfigError::ValidationError(
                "Admin password must be at least 6 characters".to_string(),
            ));
        }

        Ok(AdminUserConfig { name, email, password, phone })
    }
}
