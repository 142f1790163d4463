use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;
use serde_json::json;

use crate::dto::admin_dto::{DeleteUserQuery, UpdateBookingStatusRequest, UpdateUserRoleRequest};
use crate::dto::user_dto::UserListItem;
use crate::service::booking_service::{BookingService, BookingServiceImpl};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;

/// Dashboard routes need both user management and the booking overview.
pub struct AdminState {
    pub user_service: Arc<UserServiceImpl>,
    pub booking_service: Arc<BookingServiceImpl>,
}

pub async fn list_users_handler(
    State(state): State<Arc<AdminState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = state
        .user_service
        .list_users()
        .await
        .map_err(|_| HandlerError::internal("Failed to fetch users"))?;
    let users: Vec<UserListItem> = users.iter().map(UserListItem::from).collect();
    Ok(Json(json!({ "users": users })))
}

pub async fn update_user_role_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<UpdateUserRoleRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let (Some(user_id), Some(role)) = (payload.user_id, payload.role) else {
        return Err(HandlerError::bad_request("Invalid user ID or role"));
    };

    state
        .user_service
        .update_role(&user_id, &role)
        .await
        .map_err(HandlerError::from)?;

    Ok(Json(json!({ "message": "User role updated successfully" })))
}

pub async fn delete_user_handler(
    State(state): State<Arc<AdminState>>,
    Query(query): Query<DeleteUserQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let Some(user_id) = query.user_id.filter(|id| !id.is_empty()) else {
        return Err(HandlerError::bad_request("User ID is required"));
    };

    state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(HandlerError::from)?;

    Ok(Json(json!({ "message": "User deleted successfully" })))
}

pub async fn list_bookings_handler(
    State(state): State<Arc<AdminState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let bookings = state
        .booking_service
        .list_all_admin()
        .await
        .map_err(|_| HandlerError::internal("Failed to fetch bookings"))?;
    Ok(Json(json!({ "bookings": bookings })))
}

pub async fn update_booking_status_handler(
    State(state): State<Arc<AdminState>>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let (Some(booking_id), Some(status)) = (payload.booking_id, payload.status) else {
        return Err(HandlerError::bad_request("Invalid booking ID or status"));
    };

    state
        .booking_service
        .set_status_admin(&booking_id, &status)
        .await
        .map_err(HandlerError::from)?;

    Ok(Json(json!({ "message": "Booking status updated successfully" })))
}
