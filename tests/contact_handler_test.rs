mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{contact_app, send, InMemoryContactMessageRepository};

#[tokio::test]
async fn test_submit_contact_message() {
    let repo = Arc::new(InMemoryContactMessageRepository::default());
    let app = contact_app(repo);

    let body = json!({
        "fullName": "Sara Benali",
        "email": "sara@example.com",
        "phone": "+213555000111",
        "message": "Do you arrange visas for Turkey?"
    });
    let (status, json) = send(&app, "POST", "/contact", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Message saved successfully");
    assert!(json["id"].as_str().is_some());
}

#[tokio::test]
async fn test_submit_contact_missing_field() {
    let repo = Arc::new(InMemoryContactMessageRepository::default());
    let app = contact_app(repo);

    let body = json!({ "fullName": "Sara", "email": "sara@example.com" });
    let (status, json) = send(&app, "POST", "/contact", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "All fields are required");
}

#[tokio::test]
async fn test_submit_contact_blank_field() {
    let repo = Arc::new(InMemoryContactMessageRepository::default());
    let app = contact_app(repo);

    let body = json!({
        "fullName": "Sara",
        "email": "sara@example.com",
        "phone": "+213555000111",
        "message": ""
    });
    let (status, json) = send(&app, "POST", "/contact", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "All fields are required");
}

#[tokio::test]
async fn test_submit_contact_invalid_email() {
    let repo = Arc::new(InMemoryContactMessageRepository::default());
    let app = contact_app(repo);

    let body = json!({
        "fullName": "Sara",
        "email": "not-an-email",
        "phone": "+213555000111",
        "message": "Hello"
    });
    let (status, json) = send(&app, "POST", "/contact", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid email format");
}

#[tokio::test]
async fn test_list_contact_messages() {
    let repo = Arc::new(InMemoryContactMessageRepository::default());
    let app = contact_app(repo);

    for i in 0..2 {
        let body = json!({
            "fullName": format!("Visitor {}", i),
            "email": "visitor@example.com",
            "phone": "+213555000111",
            "message": "Hello"
        });
        let (status, _) = send(&app, "POST", "/contact", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, json) = send(&app, "GET", "/contact", None).await;

    assert_eq!(status, StatusCode::OK);
    let list = json["messages"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    // Newest first, every message starts UNREAD.
    assert_eq!(list[0]["fullName"], "Visitor 1");
    assert_eq!(list[0]["status"], "UNREAD");
    assert!(list[0].get("createdAt").is_some());
}
