use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::dto::booking_dto::{
    AdminBookingResponse, BookingResponse, BookingUpdate, CreateBookingRequest,
    PatchBookingRequest, UserSummary,
};
use crate::model::booking::{Booking, BookingStatus, BookingType};
use crate::policy::{self, Actor};
use crate::repository::booking_repo::BookingRepository;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait BookingService: Send + Sync {
    /// One user's bookings, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<BookingResponse>, ServiceError>;

    /// Every booking with the owner's name and email embedded (the clients'
    /// admin view when the userId filter is absent).
    async fn list_all(&self) -> Result<Vec<BookingResponse>, ServiceError>;

    async fn create(
        &self,
        user_id: &str,
        request: CreateBookingRequest,
    ) -> Result<Booking, ServiceError>;

    async fn get(&self, id: &str, actor: &Actor) -> Result<Booking, ServiceError>;

    async fn update(
        &self,
        id: &str,
        actor: &Actor,
        request: PatchBookingRequest,
    ) -> Result<Booking, ServiceError>;

    /// The cancel path: never removes the record, only moves it to CANCELLED.
    async fn cancel(&self, id: &str, actor: &Actor) -> Result<(), ServiceError>;

    /// Admin listing with the owner as a nested `user` object.
    async fn list_all_admin(&self) -> Result<Vec<AdminBookingResponse>, ServiceError>;

    async fn set_status_admin(&self, booking_id: &str, status: &str) -> Result<(), ServiceError>;
}

pub struct BookingServiceImpl {
    booking_repo: Arc<dyn BookingRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl BookingServiceImpl {
    pub fn new(booking_repo: Arc<dyn BookingRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
        Self { booking_repo, user_repo }
    }

    async fn owner_info(&self, booking: &Booking) -> (Option<String>, Option<String>) {
        let Ok(owner_id) = ObjectId::parse_str(&booking.user_id) else {
            return (None, None);
        };
        match self.user_repo.find_by_id(&owner_id).await {
            Ok(Some(user)) => (Some(user.email), Some(user.name)),
            _ => (None, None),
        }
    }

    fn parse_id(id: &str) -> Result<ObjectId, ServiceError> {
        ObjectId::parse_str(id)
            .map_err(|_| ServiceError::NotFound("Booking not found".to_string()))
    }
}

#[async_trait]
impl BookingService for BookingServiceImpl {
    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<BookingResponse>, ServiceError> {
        let bookings = self.booking_repo.find_by_user(user_id).await?;
        Ok(bookings.iter().map(BookingResponse::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<BookingResponse>, ServiceError> {
        let bookings = self.booking_repo.find_all().await?;
        let mut responses = Vec::with_capacity(bookings.len());
        for booking in &bookings {
            let (email, name) = self.owner_info(booking).await;
            responses.push(BookingResponse::from(booking).with_user_info(email, name));
        }
        Ok(responses)
    }

    #[instrument(skip(self, request), fields(user_id = %user_id))]
    async fn create(
        &self,
        user_id: &str,
        request: CreateBookingRequest,
    ) -> Result<Booking, ServiceError> {
        info!("Creating booking");

        let (Some(type_str), Some(destination)) = (request.booking_type, request.destination)
        else {
            return Err(ServiceError::InvalidInput(
                "Type and destination are required".to_string(),
            ));
        };
        if destination.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Type and destination are required".to_string(),
            ));
        }

        let booking_type = BookingType::from_str(&type_str)
            .map_err(|_| ServiceError::InvalidInput("Invalid booking type".to_string()))?;

        let price = match request.price {
            Some(price) if price > 0.0 => price,
            _ => return Err(ServiceError::InvalidInput("Valid price is required".to_string())),
        };

        let booking = Booking {
            id: None,
            user_id: user_id.to_string(),
            booking_type,
            destination,
            departure: request.departure,
            return_date: request.return_date,
            travelers: request.travelers.filter(|&t| t > 0).unwrap_or(1),
            price,
            details: request.details,
            // Every booking starts PENDING, whoever creates it.
            status: BookingStatus::Pending,
            created_at: None,
            updated_at: None,
        };

        let inserted = self.booking_repo.insert(booking).await?;
        Ok(inserted)
    }

    #[instrument(skip(self, actor), fields(id = %id, actor_id = %actor.id))]
    async fn get(&self, id: &str, actor: &Actor) -> Result<Booking, ServiceError> {
        let oid = Self::parse_id(id)?;
        let booking = self
            .booking_repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Booking not found".to_string()))?;

        if !policy::can_view_booking(actor, &booking) {
            warn!("Booking view refused");
            return Err(ServiceError::Forbidden("Forbidden".to_string()));
        }

        Ok(booking)
    }

    #[instrument(skip(self, actor, request), fields(id = %id, actor_id = %actor.id))]
    async fn update(
        &self,
        id: &str,
        actor: &Actor,
        request: PatchBookingRequest,
    ) -> Result<Booking, ServiceError> {
        let oid = Self::parse_id(id)?;
        self.booking_repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Booking not found".to_string()))?;

        let status = match request.status {
            Some(raw) => {
                if !policy::can_mutate_booking_status(actor) {
                    warn!("Status change refused for non-elevated actor");
                    return Err(ServiceError::Forbidden(
                        "Only admins and agents can update booking status".to_string(),
                    ));
                }
                let status = BookingStatus::from_str(&raw)
                    .map_err(|_| ServiceError::InvalidInput("Invalid booking status".to_string()))?;
                Some(status)
            }
            None => None,
        };

        // Empty strings and zero values are treated as absent, matching the
        // clients' habit of sending blank form fields.
        let update = BookingUpdate {
            status,
            departure: request.departure.filter(|s| !s.is_empty()),
            return_date: request.return_date.filter(|s| !s.is_empty()),
            travelers: request.travelers.filter(|&t| t > 0),
            destination: request.destination.filter(|s| !s.is_empty()),
            price: request.price.filter(|&p| p != 0.0),
        };

        let updated = self
            .booking_repo
            .apply_update(&oid, &update)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Booking not found".to_string()))?;

        info!("Booking updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self, actor), fields(id = %id, actor_id = %actor.id))]
    async fn cancel(&self, id: &str, actor: &Actor) -> Result<(), ServiceError> {
        let oid = Self::parse_id(id)?;
        let booking = self
            .booking_repo
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Booking not found".to_string()))?;

        if !policy::can_delete_or_cancel_booking(actor, &booking) {
            warn!("Cancel refused");
            return Err(ServiceError::Forbidden("Unauthorized".to_string()));
        }

        self.booking_repo.set_status(&oid, BookingStatus::Cancelled).await?;
        info!("Booking cancelled");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_all_admin(&self) -> Result<Vec<AdminBookingResponse>, ServiceError> {
        let bookings = self.booking_repo.find_all().await?;
        let mut responses = Vec::with_capacity(bookings.len());
        for booking in &bookings {
            let (email, name) = self.owner_info(booking).await;
            responses.push(AdminBookingResponse {
                booking: BookingResponse::from(booking),
                user: UserSummary {
                    name: name.unwrap_or_else(|| "Unknown".to_string()),
                    email: email.unwrap_or_else(|| "unknown@example.com".to_string()),
                },
            });
        }
        Ok(responses)
    }

    #[instrument(skip(self), fields(booking_id = %booking_id, status = %status))]
    async fn set_status_admin(&self, booking_id: &str, status: &str) -> Result<(), ServiceError> {
        let status = BookingStatus::from_str(status)
            .map_err(|_| ServiceError::InvalidInput("Invalid booking ID or status".to_string()))?;
        let oid = ObjectId::parse_str(booking_id)
            .map_err(|_| ServiceError::InvalidInput("Invalid booking ID or status".to_string()))?;

        let matched = self.booking_repo.set_status(&oid, status).await?;
        if !matched {
            return Err(ServiceError::NotFound("Booking not found".to_string()));
        }

        info!("Booking status updated");
        Ok(())
    }
}
