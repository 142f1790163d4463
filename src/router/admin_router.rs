use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::handler::admin_handler::{
    delete_user_handler, list_bookings_handler, list_users_handler,
    update_booking_status_handler, update_user_role_handler, AdminState,
};

pub fn admin_router(state: Arc<AdminState>) -> Router {
    Router::new()
        .route("/admin/users", get(list_users_handler))
        .route("/admin/users", put(update_user_role_handler))
        .route("/admin/users", delete(delete_user_handler))
        .route("/admin/bookings", get(list_bookings_handler))
        .route("/admin/bookings", put(update_booking_status_handler))
        .with_state(state)
}
