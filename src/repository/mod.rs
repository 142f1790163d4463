pub mod booking_repo;
pub mod contact_repo;
pub mod repository_error;
pub mod store;
pub mod user_repo;
