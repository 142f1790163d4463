use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use tracing::{error, info};

use crate::dto::user_dto::ProfileUpdate;
use crate::model::user::{Role, User};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::store::MongoStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
    async fn list_all(&self) -> RepositoryResult<Vec<User>>;
    /// Applies the partial profile update and returns the post-update user.
    async fn apply_profile_update(
        &self,
        id: &ObjectId,
        update: &ProfileUpdate,
    ) -> RepositoryResult<Option<User>>;
    /// Returns false when no user matched.
    async fn set_role(&self, id: &ObjectId, role: Role) -> RepositoryResult<bool>;
    async fn set_reset_token(
        &self,
        id: &ObjectId,
        token: &str,
        expiry: &str,
    ) -> RepositoryResult<()>;
    /// Replaces the password hash and clears both reset token fields in one
    /// update, so a token can never be used twice.
    async fn set_password_and_clear_reset(
        &self,
        id: &ObjectId,
        password_hash: &str,
    ) -> RepositoryResult<()>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoUserRepository {
            collection: store.collection::<User>("User"),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        match self.collection.insert_one(user.clone(), None).await {
            Ok(_) => {
                info!("User inserted successfully");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        let filter = doc! { "_id": id };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by id: {}", e)))?;
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> RepositoryResult<Vec<User>> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let cursor = self
            .collection
            .find(doc! {}, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list users: {}", e)))?;
        let users = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to read user cursor: {}", e)))?;
        Ok(users)
    }

    #[tracing::instrument(skip(self, update), fields(id = %id))]
    async fn apply_profile_update(
        &self,
        id: &ObjectId,
        update: &ProfileUpdate,
    ) -> RepositoryResult<Option<User>> {
        let mut set = bson::to_document(update)
            .map_err(|e| RepositoryError::serialization(format!("Failed to serialize update: {}", e)))?;
        set.insert("updatedAt", Utc::now().to_rfc3339());
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set }, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update profile: {}", e)))?;
        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(id = %id, role = %role))]
    async fn set_role(&self, id: &ObjectId, role: Role) -> RepositoryResult<bool> {
        let update = doc! {
            "$set": { "role": role.as_str(), "updatedAt": Utc::now().to_rfc3339() }
        };
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update role: {}", e)))?;
        Ok(result.matched_count > 0)
    }

    #[tracing::instrument(skip(self, token), fields(id = %id))]
    async fn set_reset_token(
        &self,
        id: &ObjectId,
        token: &str,
        expiry: &str,
    ) -> RepositoryResult<()> {
        let update = doc! {
            "$set": { "resetToken": token, "resetTokenExpiry": expiry }
        };
        self.collection
            .update_one(doc! { "_id": id }, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to store reset token: {}", e)))?;
        Ok(())
    }

    #[tracing::instrument(skip(self, password_hash), fields(id = %id))]
    async fn set_password_and_clear_reset(
        &self,
        id: &ObjectId,
        password_hash: &str,
    ) -> RepositoryResult<()> {
        let update = doc! {
            "$set": { "password": password_hash, "updatedAt": Utc::now().to_rfc3339() },
            "$unset": { "resetToken": "", "resetTokenExpiry": "" }
        };
        self.collection
            .update_one(doc! { "_id": id }, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to reset password: {}", e)))?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to delete user: {}", e)))?;
        Ok(result.deleted_count > 0)
    }
}
