use serde::{Deserialize, Serialize};
use std::env;
use tracing::{error, info, warn};

use crate::config::ConfigError;

/// Configuration for password reset functionality
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfig {
    /// Public site base URL used to build reset links
    pub base_url: String,
    /// Path to the password reset page
    pub reset_path: String,
    /// Token validity window in seconds
    pub token_expiration_secs: u64,
    /// Token length in characters
    pub token_length: usize,
}

impl PasswordResetConfig {
    /// Create PasswordResetConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading password reset configuration from environment variables");

        let base_url = env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| {
            warn!("PUBLIC_BASE_URL not set, defaulting to http://localhost:3000");
            "http://localhost:3000".to_string()
        });

        let reset_path = env::var("RESET_PASSWORD_PATH").unwrap_or_else(|_| {
            "/auth/reset-password".to_string()
        });

        let token_expiration_secs = env::var("RESET_TOKEN_EXPIRATION")
            .unwrap_or_else(|_| {
                warn!("RESET_TOKEN_EXPIRATION not set, defaulting to 3600 seconds (1 hour)");
                "3600".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid RESET_TOKEN_EXPIRATION value");
                ConfigError::InvalidValue("Invalid RESET_TOKEN_EXPIRATION value".to_string())
            })?;

        let token_length = env::var("RESET_TOKEN_LENGTH")
            .unwrap_or_else(|_| "32".to_string())
            .parse::<usize>()
            .map_err(|_| {
                error!("Invalid RESET_TOKEN_LENGTH value");
                ConfigError::InvalidValue("Invalid RESET_TOKEN_LENGTH value".to_string())
            })?;

        let config = PasswordResetConfig {
            base_url,
            reset_path,
            token_expiration_secs,
            token_length,
        };

        config.validate()?;
        info!("Password reset configuration loaded successfully");
        Ok(config)
    }

    /// Create PasswordResetConfig for testing
    pub fn from_test_env() -> Self {
        PasswordResetConfig {
            base_url: "http://localhost:3000".to_string(),
            reset_path: "/auth/reset-password".to_string(),
            token_expiration_secs: 3600,
            token_length: 32,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            error!("Base URL is empty");
            return Err(ConfigError::ValidationError("Base URL cannot be empty".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            error!("Base URL must start with http:// or https://");
            return Err(ConfigError::ValidationError(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }

        if self.reset_path.is_empty() || !self.reset_path.starts_with('/') {
            error!("Reset path must start with /");
            return Err(ConfigError::ValidationError("Reset path must start with /".to_string()));
        }

        if self.token_expiration_secs == 0 {
            error!("Token expiration is 0");
            return Err(ConfigError::ValidationError("Token expiration cannot be 0".to_string()));
        }

        if self.token_length < 8 {
            error!("Token length is too short");
            return Err(ConfigError::ValidationError(
                "Token length must be at least 8 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the reset link the user follows from the email, matching the
    /// page the frontend serves: {base}{path}?token={t}&email={urlencoded}
    pub fn reset_link(&self, token: &str, email: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!(
            "{}{}?token={}&email={}",
            base,
            self.reset_path,
            token,
            urlencoding::encode(email)
        )
    }
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        PasswordResetConfig {
            base_url: "http://localhost:3000".to_string(),
            reset_path: "/auth/reset-password".to_string(),
            token_expiration_secs: 3600,
            token_length: 32,
        }
    }
}
