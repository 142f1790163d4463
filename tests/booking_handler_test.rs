mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{booking_app, seed_booking, seed_user, send, InMemoryBookingRepository, InMemoryUserRepository};
use kefko_backend::model::user::Role;

fn repos() -> (Arc<InMemoryBookingRepository>, Arc<InMemoryUserRepository>) {
    (
        Arc::new(InMemoryBookingRepository::default()),
        Arc::new(InMemoryUserRepository::default()),
    )
}

#[tokio::test]
async fn test_create_booking() {
    let (bookings, users) = repos();
    let owner = seed_user(users.as_ref(), "Sara", "sara@example.com", "secret123", Role::User).await;
    let app = booking_app(bookings, users);

    let body = json!({
        "type": "HOTEL",
        "destination": "Istanbul",
        "departure": "2026-11-05",
        "travelers": 3,
        "price": 850.5,
        "details": { "roomType": "double" }
    });
    let uri = format!("/bookings?userId={}", owner.id_hex());
    let (status, json) = send(&app, "POST", &uri, Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Booking created successfully");
    assert_eq!(json["booking"]["type"], "HOTEL");
    assert_eq!(json["booking"]["destination"], "Istanbul");
    assert_eq!(json["booking"]["status"], "PENDING");
    assert_eq!(json["booking"]["travelers"], 3);
    assert_eq!(json["booking"]["userId"], owner.id_hex());
}

#[tokio::test]
async fn test_create_booking_defaults_one_traveler() {
    let (bookings, users) = repos();
    let app = booking_app(bookings, users);

    let body = json!({ "type": "FLIGHT", "destination": "Paris", "price": 400.0 });
    let (status, json) = send(&app, "POST", "/bookings?userId=abc123", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["booking"]["travelers"], 1);
}

#[tokio::test]
async fn test_create_booking_requires_user_id() {
    let (bookings, users) = repos();
    let app = booking_app(bookings, users);

    let body = json!({ "type": "FLIGHT", "destination": "Paris", "price": 400.0 });
    let (status, json) = send(&app, "POST", "/bookings", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "User ID required");
}

#[tokio::test]
async fn test_create_booking_missing_type_or_destination() {
    let (bookings, users) = repos();
    let app = booking_app(bookings, users);

    let (status, json) =
        send(&app, "POST", "/bookings?userId=abc123", Some(json!({ "price": 100.0 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Type and destination are required");
}

#[tokio::test]
async fn test_create_booking_invalid_type() {
    let (bookings, users) = repos();
    let app = booking_app(bookings, users);

    let body = json!({ "type": "CRUISE", "destination": "Oslo", "price": 100.0 });
    let (status, json) = send(&app, "POST", "/bookings?userId=abc123", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid booking type");
}

#[tokio::test]
async fn test_create_booking_rejects_zero_price() {
    let (bookings, users) = repos();
    let app = booking_app(bookings, users);

    let body = json!({ "type": "TOUR", "destination": "Rome", "price": 0 });
    let (status, json) = send(&app, "POST", "/bookings?userId=abc123", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Valid price is required");
}

#[tokio::test]
async fn test_list_bookings_scoped_to_user() {
    let (bookings, users) = repos();
    seed_booking(bookings.as_ref(), "user-a").await;
    seed_booking(bookings.as_ref(), "user-b").await;
    seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    let (status, json) = send(&app, "GET", "/bookings?userId=user-a", None).await;

    assert_eq!(status, StatusCode::OK);
    let list = json["bookings"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|b| b["userId"] == "user-a"));
}

#[tokio::test]
async fn test_list_all_bookings_includes_owner_info() {
    let (bookings, users) = repos();
    let owner = seed_user(users.as_ref(), "Sara", "sara@example.com", "secret123", Role::User).await;
    seed_booking(bookings.as_ref(), &owner.id_hex()).await;
    let app = booking_app(bookings, users);

    let (status, json) = send(&app, "GET", "/bookings", None).await;

    assert_eq!(status, StatusCode::OK);
    let list = json["bookings"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["userEmail"], "sara@example.com");
    assert_eq!(list[0]["userName"], "Sara");
}

#[tokio::test]
async fn test_get_booking_as_owner() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    let uri = format!("/bookings/{}?userId=user-a&userRole=USER", booking.id_hex());
    let (status, json) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["booking"]["id"], booking.id_hex());
    assert_eq!(json["booking"]["destination"], "Dubai");
}

#[tokio::test]
async fn test_get_booking_forbidden_for_stranger() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    let uri = format!("/bookings/{}?userId=user-b&userRole=USER", booking.id_hex());
    let (status, json) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "Forbidden");
}

#[tokio::test]
async fn test_get_booking_agent_sees_any() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    let uri = format!("/bookings/{}?userId=agent-1&userRole=AGENT", booking.id_hex());
    let (status, _) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_booking_unknown_id() {
    let (bookings, users) = repos();
    let app = booking_app(bookings, users);

    let (status, json) = send(
        &app,
        "GET",
        "/bookings/0123456789abcdef01234567?userId=user-a&userRole=USER",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Booking not found");
}

#[tokio::test]
async fn test_unknown_role_falls_back_to_user() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    // A garbage role grants nothing.
    let uri = format!("/bookings/{}?userId=user-b&userRole=SUPERADMIN", booking.id_hex());
    let (status, _) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_patch_status_forbidden_for_user_role() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    // Even the owner cannot move the status; cancel goes through DELETE.
    let uri = format!("/bookings/{}?userId=user-a&userRole=USER", booking.id_hex());
    let (status, json) = send(&app, "PATCH", &uri, Some(json!({ "status": "CONFIRMED" }))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "Only admins and agents can update booking status");
}

#[tokio::test]
async fn test_patch_status_as_agent() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    let uri = format!("/bookings/{}?userId=agent-1&userRole=AGENT", booking.id_hex());
    let (status, json) = send(&app, "PATCH", &uri, Some(json!({ "status": "CONFIRMED" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Booking updated successfully");
    assert_eq!(json["booking"]["status"], "CONFIRMED");
}

#[tokio::test]
async fn test_patch_invalid_status() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    let uri = format!("/bookings/{}?userId=agent-1&userRole=AGENT", booking.id_hex());
    let (status, json) = send(&app, "PATCH", &uri, Some(json!({ "status": "DONE" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid booking status");
}

#[tokio::test]
async fn test_patch_ignores_blank_fields() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    // Blank form fields arrive as empty strings and zeroes; they must not
    // wipe stored values.
    let uri = format!("/bookings/{}?userId=user-a&userRole=USER", booking.id_hex());
    let body = json!({ "destination": "", "travelers": 0, "price": 0, "departure": "2026-12-01" });
    let (status, json) = send(&app, "PATCH", &uri, Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["booking"]["destination"], "Dubai");
    assert_eq!(json["booking"]["travelers"], 2);
    assert_eq!(json["booking"]["price"], 1200.0);
    assert_eq!(json["booking"]["departure"], "2026-12-01");
}

#[tokio::test]
async fn test_cancel_booking_keeps_record() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    let uri = format!("/bookings/{}?userId=user-a&userRole=USER", booking.id_hex());
    let (status, json) = send(&app, "DELETE", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Booking cancelled successfully");

    // Cancellation is a status change, not a removal.
    let (status, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["booking"]["status"], "CANCELLED");
}

#[tokio::test]
async fn test_cancel_booking_forbidden_for_stranger() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    let uri = format!("/bookings/{}?userId=user-b&userRole=USER", booking.id_hex());
    let (status, json) = send(&app, "DELETE", &uri, None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "Unauthorized");
}

#[tokio::test]
async fn test_cancel_is_idempotent() {
    let (bookings, users) = repos();
    let booking = seed_booking(bookings.as_ref(), "user-a").await;
    let app = booking_app(bookings, users);

    let uri = format!("/bookings/{}?userId=user-a&userRole=USER", booking.id_hex());
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    // A second cancel is accepted; transitions are not gated on the
    // current status.
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}
