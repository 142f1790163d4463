use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use tracing::{error, info};

use crate::model::contact::ContactMessage;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::store::MongoStore;

#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn insert(&self, message: ContactMessage) -> RepositoryResult<ContactMessage>;
    async fn list_all(&self) -> RepositoryResult<Vec<ContactMessage>>;
}

pub struct MongoContactMessageRepository {
    collection: mongodb::Collection<ContactMessage>,
}

impl MongoContactMessageRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoContactMessageRepository {
            collection: store.collection::<ContactMessage>("ContactMessage"),
        }
    }
}

#[async_trait]
impl ContactMessageRepository for MongoContactMessageRepository {
    #[tracing::instrument(skip(self, message), fields(email = %message.email))]
    async fn insert(&self, mut message: ContactMessage) -> RepositoryResult<ContactMessage> {
        message.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        message.created_at = Some(now.clone());
        message.updated_at = Some(now);
        match self.collection.insert_one(message.clone(), None).await {
            Ok(_) => {
                info!("Contact message saved");
                Ok(message)
            }
            Err(e) => {
                error!("Failed to save contact message: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> RepositoryResult<Vec<ContactMessage>> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let cursor = self
            .collection
            .find(doc! {}, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list messages: {}", e)))?;
        let messages = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to read message cursor: {}", e)))?;
        Ok(messages)
    }
}
