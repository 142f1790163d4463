use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::dto::contact_dto::{ContactMessageResponse, ContactRequest};
use crate::service::contact_service::{ContactService, ContactServiceImpl};
use crate::util::error::HandlerError;

pub async fn submit_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Json(payload): Json<ContactRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let (Some(full_name), Some(email), Some(phone), Some(message)) =
        (payload.full_name, payload.email, payload.phone, payload.message)
    else {
        return Err(HandlerError::bad_request("All fields are required"));
    };

    let saved = service
        .submit(full_name, email, phone, message)
        .await
        .map_err(HandlerError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Message saved successfully",
            "id": saved.id_hex(),
        })),
    ))
}

pub async fn list_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let messages = service.list_all().await.map_err(HandlerError::from)?;
    let messages: Vec<ContactMessageResponse> =
        messages.iter().map(ContactMessageResponse::from).collect();
    Ok(Json(json!({ "messages": messages })))
}
