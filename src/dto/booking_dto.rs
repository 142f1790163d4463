use bson::Document;
use serde::{Deserialize, Serialize};

use crate::model::booking::{Booking, BookingStatus};

/// Identity the clients pass on booking routes.
#[derive(Debug, Deserialize)]
pub struct IdentityQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "userRole")]
    pub user_role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(rename = "type")]
    pub booking_type: Option<String>,
    pub destination: Option<String>,
    pub departure: Option<String>,
    #[serde(rename = "returnDate")]
    pub return_date: Option<String>,
    pub travelers: Option<u32>,
    pub price: Option<f64>,
    pub details: Option<Document>,
}

/// PATCH body. Status arrives as a raw string so an unknown value maps to a
/// clean 400 instead of a body-level deserialization failure.
#[derive(Debug, Deserialize)]
pub struct PatchBookingRequest {
    pub status: Option<String>,
    pub departure: Option<String>,
    #[serde(rename = "returnDate")]
    pub return_date: Option<String>,
    pub travelers: Option<u32>,
    pub destination: Option<String>,
    pub price: Option<f64>,
}

/// Validated partial update merged into the stored document with a single
/// `$set`. Absent fields never touch the document.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    #[serde(rename = "returnDate", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travelers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A booking as the clients see it: the stored fields plus the id as a hex
/// string and, on the admin list view, the owning user's name and email.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "type")]
    pub booking_type: String,
    pub destination: String,
    pub departure: Option<String>,
    #[serde(rename = "returnDate")]
    pub return_date: Option<String>,
    pub travelers: u32,
    pub price: f64,
    pub details: Option<Document>,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        BookingResponse {
            id: booking.id_hex(),
            user_id: booking.user_id.clone(),
            booking_type: booking.booking_type.as_str().to_string(),
            destination: booking.destination.clone(),
            departure: booking.departure.clone(),
            return_date: booking.return_date.clone(),
            travelers: booking.travelers,
            price: booking.price,
            details: booking.details.clone(),
            status: booking.status.as_str().to_string(),
            created_at: booking.created_at.clone(),
            updated_at: booking.updated_at.clone(),
            user_email: None,
            user_name: None,
        }
    }
}

impl BookingResponse {
    pub fn with_user_info(mut self, email: Option<String>, name: Option<String>) -> Self {
        self.user_email = email;
        self.user_name = name;
        self
    }
}

/// Admin bookings list embeds the owner as a nested object instead.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminBookingResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub user: UserSummary,
}
