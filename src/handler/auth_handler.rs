use std::sync::Arc;

use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde_json::json;

use crate::dto::auth_dto::{
    ForgotPasswordRequest, ResetPasswordRequest, SigninRequest, SigninUser, SignupRequest,
    SignupUser,
};
use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::util::error::HandlerError;

/// Auth routes carry the dev-mode flag alongside the service: development
/// responses expose the reset link that production delivers by email only.
pub struct AuthState {
    pub service: Arc<AuthServiceImpl>,
    pub dev_mode: bool,
}

pub async fn signup_handler(
    State(state): State<Arc<AuthState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let (Some(name), Some(email), Some(password)) = (payload.name, payload.email, payload.password)
    else {
        return Err(HandlerError::bad_request("Name, email, and password are required"));
    };
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(HandlerError::bad_request("Name, email, and password are required"));
    }

    let user = state
        .service
        .register(name, email, password, payload.phone)
        .await
        .map_err(HandlerError::from)?;

    Ok(Json(json!({
        "message": "User created successfully",
        "user": SignupUser::from(&user),
    })))
}

pub async fn signin_handler(
    State(state): State<Arc<AuthState>>,
    Json(payload): Json<SigninRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(HandlerError::bad_request("Email and password are required"));
    };
    if email.is_empty() || password.is_empty() {
        return Err(HandlerError::bad_request("Email and password are required"));
    }

    let user = state
        .service
        .login(email, password)
        .await
        .map_err(HandlerError::from)?;

    Ok(Json(json!({
        "message": "Sign in successful",
        "user": SigninUser::from(&user),
    })))
}

pub async fn forgot_password_handler(
    State(state): State<Arc<AuthState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let Some(email) = payload.email.filter(|e| !e.is_empty()) else {
        return Err(HandlerError::bad_request("Email is required"));
    };

    let debug = state
        .service
        .forgot_password(email)
        .await
        .map_err(HandlerError::from)?;

    let mut body = json!({
        "message": "If an account with this email exists, a password reset link has been sent.",
    });
    if state.dev_mode {
        if let Some(info) = debug {
            body["debugInfo"] = serde_json::to_value(info)
                .map_err(|e| HandlerError::internal(e.to_string()))?;
        }
    }

    Ok(Json(body))
}

pub async fn reset_password_handler(
    State(state): State<Arc<AuthState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let (Some(token), Some(email), Some(password)) =
        (payload.token, payload.email, payload.password)
    else {
        return Err(HandlerError::bad_request("Token, email, and password are required"));
    };
    if token.is_empty() || email.is_empty() || password.is_empty() {
        return Err(HandlerError::bad_request("Token, email, and password are required"));
    }

    state
        .service
        .reset_password(token, email, password)
        .await
        .map_err(HandlerError::from)?;

    Ok(Json(json!({ "message": "Password reset successfully" })))
}
