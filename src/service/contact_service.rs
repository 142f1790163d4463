use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};
use validator::ValidateEmail;

use crate::model::contact::ContactMessage;
use crate::repository::contact_repo::ContactMessageRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait ContactService: Send + Sync {
    /// Public submission path: no authentication, all fields required.
    async fn submit(
        &self,
        full_name: String,
        email: String,
        phone: String,
        message: String,
    ) -> Result<ContactMessage, ServiceError>;

    async fn list_all(&self) -> Result<Vec<ContactMessage>, ServiceError>;
}

pub struct ContactServiceImpl {
    contact_repo: Arc<dyn ContactMessageRepository>,
}

impl ContactServiceImpl {
    pub fn new(contact_repo: Arc<dyn ContactMessageRepository>) -> Self {
        Self { contact_repo }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    #[instrument(skip(self, message), fields(email = %email))]
    async fn submit(
        &self,
        full_name: String,
        email: String,
        phone: String,
        message: String,
    ) -> Result<ContactMessage, ServiceError> {
        if full_name.is_empty() || email.is_empty() || phone.is_empty() || message.is_empty() {
            return Err(ServiceError::InvalidInput("All fields are required".to_string()));
        }

        if !email.validate_email() {
            return Err(ServiceError::InvalidInput("Invalid email format".to_string()));
        }

        let saved = self
            .contact_repo
            .insert(ContactMessage {
                id: None,
                full_name,
                email,
                phone,
                message,
                status: "UNREAD".to_string(),
                created_at: None,
                updated_at: None,
            })
            .await?;

        info!("Contact message stored");
        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<ContactMessage>, ServiceError> {
        Ok(self.contact_repo.list_all().await?)
    }
}
