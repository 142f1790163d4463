use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::dto::user_dto::ProfileUpdate;
use crate::model::user::{Role, User};
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;

/// Profile access plus the admin-side user management operations.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<User, ServiceError>;

    /// Applies a partial profile update. Role is not part of the update
    /// type, so this path can never escalate privileges.
    async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<User, ServiceError>;

    async fn list_users(&self) -> Result<Vec<User>, ServiceError>;

    async fn update_role(&self, user_id: &str, role: &str) -> Result<(), ServiceError>;

    async fn delete_user(&self, user_id: &str) -> Result<(), ServiceError>;
}

pub struct UserServiceImpl {
    user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    fn parse_id(user_id: &str) -> Result<ObjectId, ServiceError> {
        ObjectId::parse_str(user_id)
            .map_err(|_| ServiceError::InvalidInput("Invalid user ID".to_string()))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: &str) -> Result<User, ServiceError> {
        let oid = Self::parse_id(user_id)?;
        self.user_repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    #[instrument(skip(self, update), fields(user_id = %user_id))]
    async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<User, ServiceError> {
        let oid = Self::parse_id(user_id)?;
        let updated = self
            .user_repo
            .apply_profile_update(&oid, &update)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
        info!("Profile updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.user_repo.list_all().await?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, role = %role))]
    async fn update_role(&self, user_id: &str, role: &str) -> Result<(), ServiceError> {
        let role = Role::from_str(role)
            .map_err(|_| ServiceError::InvalidInput("Invalid user ID or role".to_string()))?;
        let oid = ObjectId::parse_str(user_id)
            .map_err(|_| ServiceError::InvalidInput("Invalid user ID or role".to_string()))?;

        let matched = self.user_repo.set_role(&oid, role).await?;
        if !matched {
            warn!("Role change for unknown user");
            return Err(ServiceError::NotFound("User not found".to_string()));
        }

        info!("User role updated");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn delete_user(&self, user_id: &str) -> Result<(), ServiceError> {
        let oid = Self::parse_id(user_id)?;
        let deleted = self.user_repo.delete(&oid).await?;
        if !deleted {
            return Err(ServiceError::NotFound("User not found".to_string()));
        }

        info!("User deleted");
        Ok(())
    }
}
