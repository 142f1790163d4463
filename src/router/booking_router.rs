use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handler::booking_handler::{
    cancel_booking_handler, create_booking_handler, get_booking_handler, list_bookings_handler,
    update_booking_handler,
};
use crate::service::booking_service::BookingServiceImpl;

pub fn booking_router(service: Arc<BookingServiceImpl>) -> Router {
    Router::new()
        .route("/bookings", get(list_bookings_handler))
        .route("/bookings", post(create_booking_handler))
        .route("/bookings/:id", get(get_booking_handler))
        .route("/bookings/:id", patch(update_booking_handler))
        .route("/bookings/:id", delete(cancel_booking_handler))
        .with_state(service)
}
