#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bson::oid::ObjectId;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt; // for .oneshot()

use kefko_backend::config::PasswordResetConfig;
use kefko_backend::dto::booking_dto::BookingUpdate;
use kefko_backend::dto::user_dto::ProfileUpdate;
use kefko_backend::handler::admin_handler::AdminState;
use kefko_backend::handler::auth_handler::AuthState;
use kefko_backend::model::booking::{Booking, BookingStatus};
use kefko_backend::model::contact::ContactMessage;
use kefko_backend::model::user::{Role, User};
use kefko_backend::repository::booking_repo::BookingRepository;
use kefko_backend::repository::contact_repo::ContactMessageRepository;
use kefko_backend::repository::repository_error::RepositoryResult;
use kefko_backend::repository::user_repo::UserRepository;
use kefko_backend::router::admin_router::admin_router;
use kefko_backend::router::auth_router::auth_router;
use kefko_backend::router::booking_router::booking_router;
use kefko_backend::router::contact_router::contact_router;
use kefko_backend::router::user_router::user_router;
use kefko_backend::service::auth_service::AuthServiceImpl;
use kefko_backend::service::booking_service::BookingServiceImpl;
use kefko_backend::service::contact_service::ContactServiceImpl;
use kefko_backend::service::user_service::UserServiceImpl;
use kefko_backend::util::password::{PasswordUtils, PasswordUtilsImpl};

/// In-memory stand-ins for the Mongo repositories, so the handler stack can
/// be exercised without a running database.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id.as_ref() == Some(id))
            .cloned())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.reverse(); // newest first, insertion order stands in for createdAt
        Ok(users)
    }

    async fn apply_profile_update(
        &self,
        id: &ObjectId,
        update: &ProfileUpdate,
    ) -> RepositoryResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id.as_ref() == Some(id)) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(phone) = &update.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(dob) = &update.date_of_birth {
            user.date_of_birth = Some(dob.clone());
        }
        if let Some(nationality) = &update.nationality {
            user.nationality = Some(nationality.clone());
        }
        if let Some(passport) = &update.passport_number {
            user.passport_number = Some(passport.clone());
        }
        if let Some(preferences) = &update.preferences {
            user.preferences = Some(preferences.clone());
        }
        user.updated_at = Some(Utc::now().to_rfc3339());
        Ok(Some(user.clone()))
    }

    async fn set_role(&self, id: &ObjectId, role: Role) -> RepositoryResult<bool> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id.as_ref() == Some(id)) {
            Some(user) => {
                user.role = role;
                user.updated_at = Some(Utc::now().to_rfc3339());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_reset_token(
        &self,
        id: &ObjectId,
        token: &str,
        expiry: &str,
    ) -> RepositoryResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id.as_ref() == Some(id)) {
            user.reset_token = Some(token.to_string());
            user.reset_token_expiry = Some(expiry.to_string());
            user.updated_at = Some(Utc::now().to_rfc3339());
        }
        Ok(())
    }

    async fn set_password_and_clear_reset(
        &self,
        id: &ObjectId,
        password_hash: &str,
    ) -> RepositoryResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id.as_ref() == Some(id)) {
            user.password = password_hash.to_string();
            user.reset_token = None;
            user.reset_token_expiry = None;
            user.updated_at = Some(Utc::now().to_rfc3339());
        }
        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id.as_ref() != Some(id));
        Ok(users.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<Vec<Booking>>,
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, mut booking: Booking) -> RepositoryResult<Booking> {
        booking.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        booking.created_at = Some(now.clone());
        booking.updated_at = Some(now);
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id.as_ref() == Some(id))
            .cloned())
    }

    async fn find_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookings.reverse();
        Ok(bookings)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Booking>> {
        let mut bookings = self.bookings.lock().unwrap().clone();
        bookings.reverse();
        Ok(bookings)
    }

    async fn apply_update(
        &self,
        id: &ObjectId,
        update: &BookingUpdate,
    ) -> RepositoryResult<Option<Booking>> {
        let mut bookings = self.bookings.lock().unwrap();
        let Some(booking) = bookings.iter_mut().find(|b| b.id.as_ref() == Some(id)) else {
            return Ok(None);
        };
        if let Some(status) = update.status {
            booking.status = status;
        }
        if let Some(departure) = &update.departure {
            booking.departure = Some(departure.clone());
        }
        if let Some(return_date) = &update.return_date {
            booking.return_date = Some(return_date.clone());
        }
        if let Some(travelers) = update.travelers {
            booking.travelers = travelers;
        }
        if let Some(destination) = &update.destination {
            booking.destination = destination.clone();
        }
        if let Some(price) = update.price {
            booking.price = price;
        }
        booking.updated_at = Some(Utc::now().to_rfc3339());
        Ok(Some(booking.clone()))
    }

    async fn set_status(&self, id: &ObjectId, status: BookingStatus) -> RepositoryResult<bool> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.iter_mut().find(|b| b.id.as_ref() == Some(id)) {
            Some(booking) => {
                booking.status = status;
                booking.updated_at = Some(Utc::now().to_rfc3339());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryContactMessageRepository {
    messages: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl ContactMessageRepository for InMemoryContactMessageRepository {
    async fn insert(&self, mut message: ContactMessage) -> RepositoryResult<ContactMessage> {
        message.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        message.created_at = Some(now.clone());
        message.updated_at = Some(now);
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<ContactMessage>> {
        let mut messages = self.messages.lock().unwrap().clone();
        messages.reverse();
        Ok(messages)
    }
}

pub fn auth_app(user_repo: Arc<dyn UserRepository>) -> Router {
    let service = Arc::new(AuthServiceImpl::new(
        user_repo,
        PasswordResetConfig::from_test_env(),
        None,
    ));
    auth_router(Arc::new(AuthState { service, dev_mode: true }))
}

pub fn booking_app(
    booking_repo: Arc<dyn BookingRepository>,
    user_repo: Arc<dyn UserRepository>,
) -> Router {
    booking_router(Arc::new(BookingServiceImpl::new(booking_repo, user_repo)))
}

pub fn user_app(user_repo: Arc<dyn UserRepository>) -> Router {
    user_router(Arc::new(UserServiceImpl::new(user_repo)))
}

pub fn admin_app(
    user_repo: Arc<dyn UserRepository>,
    booking_repo: Arc<dyn BookingRepository>,
) -> Router {
    admin_router(Arc::new(AdminState {
        user_service: Arc::new(UserServiceImpl::new(user_repo.clone())),
        booking_service: Arc::new(BookingServiceImpl::new(booking_repo, user_repo)),
    }))
}

pub fn contact_app(contact_repo: Arc<dyn ContactMessageRepository>) -> Router {
    contact_router(Arc::new(ContactServiceImpl::new(contact_repo)))
}

/// Inserts a user with a real argon2 hash so sign-in works against it.
pub async fn seed_user(
    repo: &dyn UserRepository,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> User {
    let hash = PasswordUtilsImpl::hash_password(password).expect("hash");
    repo.insert(User {
        id: None,
        name: name.to_string(),
        email: email.to_string(),
        password: hash,
        phone: None,
        role,
        date_of_birth: None,
        nationality: None,
        passport_number: None,
        preferences: None,
        reset_token: None,
        reset_token_expiry: None,
        created_at: None,
        updated_at: None,
    })
    .await
    .expect("seed user")
}

pub async fn seed_booking(repo: &dyn BookingRepository, user_id: &str) -> Booking {
    use kefko_backend::model::booking::BookingType;
    repo.insert(Booking {
        id: None,
        user_id: user_id.to_string(),
        booking_type: BookingType::Flight,
        destination: "Dubai".to_string(),
        departure: Some("2026-10-01".to_string()),
        return_date: Some("2026-10-10".to_string()),
        travelers: 2,
        price: 1200.0,
        details: None,
        status: BookingStatus::Pending,
        created_at: None,
        updated_at: None,
    })
    .await
    .expect("seed booking")
}

/// Fires one request at the router and returns the status with the parsed
/// JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder().method(method).uri(uri).body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
