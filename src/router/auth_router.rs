use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handler::auth_handler::{
    forgot_password_handler, reset_password_handler, signin_handler, signup_handler, AuthState,
};

pub fn auth_router(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/signin", post(signin_handler))
        .route("/auth/forgot-password", post(forgot_password_handler))
        .route("/auth/reset-password", post(reset_password_handler))
        .with_state(state)
}
