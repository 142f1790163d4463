pub mod admin_router;
pub mod auth_router;
pub mod booking_router;
pub mod contact_router;
pub mod user_router;
