//! Role and ownership checks shared by every handler.
//!
//! The role hierarchy is a total order (USER < AGENT < ADMIN); each check
//! either passes or maps to a 403 at the HTTP boundary, never a partial
//! success.

use crate::model::booking::Booking;
use crate::model::user::Role;

/// The identity a request acts as, taken from the `userId`/`userRole`
/// query parameters the clients send.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Actor { id: id.into(), role }
    }

    fn is_elevated(&self) -> bool {
        self.role >= Role::Agent
    }
}

/// Owner or any elevated role may read a booking.
pub fn can_view_booking(actor: &Actor, booking: &Booking) -> bool {
    actor.id == booking.user_id || actor.is_elevated()
}

/// Status transitions are reserved for AGENT/ADMIN; ownership alone is not
/// enough, even on the owner's own booking. The owner-initiated cancel goes
/// through the delete path instead.
pub fn can_mutate_booking_status(actor: &Actor) -> bool {
    actor.is_elevated()
}

/// Cancel (the DELETE path) is open to the owner or any elevated role.
pub fn can_delete_or_cancel_booking(actor: &Actor, booking: &Booking) -> bool {
    actor.id == booking.user_id || actor.is_elevated()
}

/// User management (role changes, deletion) is ADMIN only.
pub fn can_manage_users(actor: &Actor) -> bool {
    actor.role == Role::Admin
}
