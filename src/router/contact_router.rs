use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handler::contact_handler::{list_contact_handler, submit_contact_handler};
use crate::service::contact_service::ContactServiceImpl;

// The listing route is open by design choice: the reference clients fetch
// it without credentials. See DESIGN.md.
pub fn contact_router(service: Arc<ContactServiceImpl>) -> Router {
    Router::new()
        .route("/contact", post(submit_contact_handler))
        .route("/contact", get(list_contact_handler))
        .with_state(service)
}
