pub mod auth_service;
pub mod booking_service;
pub mod contact_service;
pub mod user_service;
