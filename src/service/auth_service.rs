use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use tracing::{error, info, instrument, warn};
use validator::ValidateEmail;

use crate::config::PasswordResetConfig;
use crate::dto::auth_dto::ResetDebugInfo;
use crate::model::user::{Role, User};
use crate::repository::user_repo::UserRepository;
use crate::util::email::SmtpEmailService;
use crate::util::error::ServiceError;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl, MIN_PASSWORD_LEN};

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        phone: Option<String>,
    ) -> Result<User, ServiceError>;

    /// Both unknown email and wrong password yield the same generic error,
    /// so the response never reveals whether an account exists.
    async fn login(&self, email: String, password: String) -> Result<User, ServiceError>;

    /// Always succeeds from the caller's perspective; `Some` carries the
    /// token and link only when a matching account exists.
    async fn forgot_password(&self, email: String) -> Result<Option<ResetDebugInfo>, ServiceError>;

    async fn reset_password(
        &self,
        token: String,
        email: String,
        new_password: String,
    ) -> Result<(), ServiceError>;
}

pub struct AuthServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    reset_config: PasswordResetConfig,
    mailer: Option<Arc<SmtpEmailService>>,
}

impl AuthServiceImpl {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        reset_config: PasswordResetConfig,
        mailer: Option<Arc<SmtpEmailService>>,
    ) -> Self {
        Self { user_repo, reset_config, mailer }
    }

    fn generate_reset_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.reset_config.token_length)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        phone: Option<String>,
    ) -> Result<User, ServiceError> {
        info!("Registering new user");

        if password.len() < MIN_PASSWORD_LEN {
            return Err(ServiceError::InvalidInput(
                "Password must be at least 6 characters long".to_string(),
            ));
        }

        if let Some(_existing) = self.user_repo.find_by_email(&email).await? {
            warn!("Sign-up attempt with existing email");
            return Err(ServiceError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let hash = PasswordUtilsImpl::hash_password(&password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            name,
            email,
            password: hash,
            phone,
            role: Role::User,
            date_of_birth: None,
            nationality: None,
            passport_number: None,
            preferences: None,
            reset_token: None,
            reset_token_expiry: None,
            created_at: None,
            updated_at: None,
        };

        let inserted = self.user_repo.insert(user).await?;
        info!("User registered successfully");
        Ok(inserted)
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<User, ServiceError> {
        info!("User login attempt");

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown email");
                return Err(ServiceError::Unauthorized("Invalid email or password".to_string()));
            }
        };

        let valid = PasswordUtilsImpl::verify_password(&password, &user.password)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Invalid credentials");
            return Err(ServiceError::Unauthorized("Invalid email or password".to_string()));
        }

        info!("User logged in successfully");
        Ok(user)
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn forgot_password(&self, email: String) -> Result<Option<ResetDebugInfo>, ServiceError> {
        info!("Password reset requested");

        if !email.validate_email() {
            return Err(ServiceError::InvalidInput("Invalid email format".to_string()));
        }

        // No enumeration signal: an unknown email still looks like success.
        let user = match self.user_repo.find_by_email(&email.to_lowercase()).await? {
            Some(user) => user,
            None => {
                info!("No account for requested email, returning generic success");
                return Ok(None);
            }
        };

        let user_id = user
            .id
            .as_ref()
            .ok_or_else(|| ServiceError::InternalError("User record has no id".to_string()))?;

        let token = self.generate_reset_token();
        let expiry = (Utc::now() + Duration::seconds(self.reset_config.token_expiration_secs as i64))
            .to_rfc3339();
        self.user_repo.set_reset_token(user_id, &token, &expiry).await?;

        let reset_link = self.reset_config.reset_link(&token, &user.email);

        match &self.mailer {
            Some(mailer) => {
                // Delivery failures must not leak back to the caller either.
                if let Err(e) = mailer
                    .send_password_reset_email(&user.email, &user.name, &reset_link)
                    .await
                {
                    error!("Failed to send reset email: {}", e);
                }
            }
            None => info!("SMTP not configured, reset link: {}", reset_link),
        }

        Ok(Some(ResetDebugInfo { reset_token: token, reset_link }))
    }

    #[instrument(skip(self, token, new_password), fields(email = %email))]
    async fn reset_password(
        &self,
        token: String,
        email: String,
        new_password: String,
    ) -> Result<(), ServiceError> {
        info!("Resetting user password");

        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(ServiceError::InvalidInput(
                "Password must be at least 6 characters long".to_string(),
            ));
        }

        let invalid_token =
            || ServiceError::InvalidInput("Invalid or expired reset token".to_string());

        let user = self
            .user_repo
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(invalid_token)?;

        let now = Utc::now().to_rfc3339();
        let token_matches = user.reset_token.as_deref() == Some(token.as_str());
        if !token_matches || !user.reset_token_valid(&now) {
            warn!("Reset attempted with invalid or expired token");
            return Err(invalid_token());
        }

        let user_id = user
            .id
            .as_ref()
            .ok_or_else(|| ServiceError::InternalError("User record has no id".to_string()))?;

        let hash = PasswordUtilsImpl::hash_password(&new_password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        // Hash replacement and token clearing happen in one update.
        self.user_repo.set_password_and_clear_reset(user_id, &hash).await?;

        info!("Password reset successfully");
        Ok(())
    }
}
