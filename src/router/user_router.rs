use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::handler::user_handler::{get_profile_handler, update_profile_handler};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .route("/user/profile", get(get_profile_handler))
        .route("/user/profile", patch(update_profile_handler))
        .with_state(service)
}
