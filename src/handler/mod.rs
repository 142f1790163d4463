pub mod admin_handler;
pub mod auth_handler;
pub mod booking_handler;
pub mod contact_handler;
pub mod user_handler;
