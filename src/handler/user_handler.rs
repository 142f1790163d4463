use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;
use serde_json::json;

use crate::dto::user_dto::{PatchProfileRequest, ProfileResponse, ProfileUpdate, UserIdQuery};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;

pub async fn get_profile_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Query(query): Query<UserIdQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let Some(user_id) = query.user_id.as_deref().filter(|id| !id.is_empty()) else {
        return Err(HandlerError::bad_request("User ID required"));
    };

    let user = service.get_profile(user_id).await.map_err(HandlerError::from)?;
    Ok(Json(json!({ "user": ProfileResponse::from(&user) })))
}

pub async fn update_profile_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Query(query): Query<UserIdQuery>,
    Json(payload): Json<PatchProfileRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let Some(user_id) = query.user_id.as_deref().filter(|id| !id.is_empty()) else {
        return Err(HandlerError::bad_request("User ID required"));
    };

    let user = service
        .update_profile(user_id, ProfileUpdate::from(payload))
        .await
        .map_err(HandlerError::from)?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": ProfileResponse::from(&user),
    })))
}
