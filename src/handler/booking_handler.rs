use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::dto::booking_dto::{
    BookingResponse, CreateBookingRequest, IdentityQuery, PatchBookingRequest,
};
use crate::model::user::Role;
use crate::policy::Actor;
use crate::service::booking_service::{BookingService, BookingServiceImpl};
use crate::util::error::HandlerError;

/// Builds the acting identity from the query parameters. A missing or
/// unrecognized role falls back to USER, so it never grants anything.
fn actor_from_query(query: &IdentityQuery) -> Result<Actor, HandlerError> {
    let user_id = query
        .user_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| HandlerError::bad_request("User ID required"))?;
    let role = query
        .user_role
        .as_deref()
        .and_then(|r| Role::from_str(r).ok())
        .unwrap_or(Role::User);
    Ok(Actor::new(user_id, role))
}

pub async fn list_bookings_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Query(query): Query<IdentityQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let bookings = match query.user_id.as_deref().filter(|id| !id.is_empty()) {
        Some(user_id) => service.list_for_user(user_id).await,
        None => service.list_all().await,
    }
    .map_err(HandlerError::from)?;

    Ok(Json(json!({ "bookings": bookings })))
}

pub async fn create_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Query(query): Query<IdentityQuery>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let Some(user_id) = query.user_id.as_deref().filter(|id| !id.is_empty()) else {
        return Err(HandlerError::bad_request("User ID required"));
    };

    let booking = service
        .create(user_id, payload)
        .await
        .map_err(HandlerError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Booking created successfully",
            "booking": BookingResponse::from(&booking),
        })),
    ))
}

pub async fn get_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
    Query(query): Query<IdentityQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let actor = actor_from_query(&query)?;
    let booking = service.get(&id, &actor).await.map_err(HandlerError::from)?;
    Ok(Json(json!({ "booking": BookingResponse::from(&booking) })))
}

pub async fn update_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
    Query(query): Query<IdentityQuery>,
    Json(payload): Json<PatchBookingRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let actor = actor_from_query(&query)?;
    let booking = service
        .update(&id, &actor, payload)
        .await
        .map_err(HandlerError::from)?;

    Ok(Json(json!({
        "message": "Booking updated successfully",
        "booking": BookingResponse::from(&booking),
    })))
}

pub async fn cancel_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
    Query(query): Query<IdentityQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let actor = actor_from_query(&query)?;
    service.cancel(&id, &actor).await.map_err(HandlerError::from)?;
    Ok(Json(json!({ "message": "Booking cancelled successfully" })))
}
