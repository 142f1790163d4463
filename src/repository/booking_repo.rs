use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use tracing::{error, info};

use crate::dto::booking_dto::BookingUpdate;
use crate::model::booking::{Booking, BookingStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::store::MongoStore;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Booking) -> RepositoryResult<Booking>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Booking>>;
    /// The owning user's bookings, newest first.
    async fn find_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Booking>>;
    /// Every booking, newest first.
    async fn find_all(&self) -> RepositoryResult<Vec<Booking>>;
    /// Applies the partial update and returns the post-update booking.
    async fn apply_update(
        &self,
        id: &ObjectId,
        update: &BookingUpdate,
    ) -> RepositoryResult<Option<Booking>>;
    /// Returns false when no booking matched.
    async fn set_status(&self, id: &ObjectId, status: BookingStatus) -> RepositoryResult<bool>;
}

pub struct MongoBookingRepository {
    collection: mongodb::Collection<Booking>,
}

impl MongoBookingRepository {
    pub fn new(store: &MongoStore) -> Self {
        MongoBookingRepository {
            collection: store.collection::<Booking>("Booking"),
        }
    }

    fn newest_first() -> FindOptions {
        FindOptions::builder().sort(doc! { "createdAt": -1 }).build()
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    #[tracing::instrument(skip(self, booking), fields(user_id = %booking.user_id, destination = %booking.destination))]
    async fn insert(&self, mut booking: Booking) -> RepositoryResult<Booking> {
        booking.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        booking.created_at = Some(now.clone());
        booking.updated_at = Some(now);
        match self.collection.insert_one(booking.clone(), None).await {
            Ok(_) => {
                info!("Booking created successfully");
                Ok(booking)
            }
            Err(e) => {
                error!("Failed to create booking: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Booking>> {
        let booking = self
            .collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch booking: {}", e)))?;
        Ok(booking)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Booking>> {
        let cursor = self
            .collection
            .find(doc! { "userId": user_id }, Self::newest_first())
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list bookings: {}", e)))?;
        let bookings = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to read booking cursor: {}", e)))?;
        Ok(bookings)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Booking>> {
        let cursor = self
            .collection
            .find(doc! {}, Self::newest_first())
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list bookings: {}", e)))?;
        let bookings = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to read booking cursor: {}", e)))?;
        Ok(bookings)
    }

    #[tracing::instrument(skip(self, update), fields(id = %id))]
    async fn apply_update(
        &self,
        id: &ObjectId,
        update: &BookingUpdate,
    ) -> RepositoryResult<Option<Booking>> {
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
            .map_err(|e| RepositoryError::database(format!("Failed to update booking: {}", e)))?;
        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(id = %id, status = %status))]
    async fn set_status(&self, id: &ObjectId, status: BookingStatus) -> RepositoryResult<bool> {
        let update = doc! {
            "$set": { "status": status.as_str(), "updatedAt": Utc::now().to_rfc3339() }
        };
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update booking status: {}", e)))?;
        Ok(result.matched_count > 0)
    }
}
