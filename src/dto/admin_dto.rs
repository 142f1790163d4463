use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRoleRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    #[serde(rename = "bookingId")]
    pub booking_id: Option<String>,
    pub status: Option<String>,
}
