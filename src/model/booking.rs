use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingType {
    #[serde(rename = "FLIGHT")]
    Flight,
    #[serde(rename = "HOTEL")]
    Hotel,
    #[serde(rename = "TOUR")]
    Tour,
    #[serde(rename = "VISA")]
    Visa,
    #[serde(rename = "CAR_RENTAL")]
    CarRental,
    #[serde(rename = "INSURANCE")]
    Insurance,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Flight => "FLIGHT",
            BookingType::Hotel => "HOTEL",
            BookingType::Tour => "TOUR",
            BookingType::Visa => "VISA",
            BookingType::CarRental => "CAR_RENTAL",
            BookingType::Insurance => "INSURANCE",
        }
    }
}

impl FromStr for BookingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FLIGHT" => Ok(BookingType::Flight),
            "HOTEL" => Ok(BookingType::Hotel),
            "TOUR" => Ok(BookingType::Tour),
            "VISA" => Ok(BookingType::Visa),
            "CAR_RENTAL" => Ok(BookingType::CarRental),
            "INSURANCE" => Ok(BookingType::Insurance),
            other => Err(format!("Unknown booking type: {}", other)),
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle tag on a booking. Every booking starts PENDING; cancellation is
/// a status change, never a row removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            "COMPLETED" => Ok(BookingStatus::Completed),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub destination: String,
    pub departure: Option<String>,
    #[serde(rename = "returnDate")]
    pub return_date: Option<String>,
    pub travelers: u32,
    pub price: f64,
    pub details: Option<Document>,
    pub status: BookingStatus,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl Booking {
    pub fn id_hex(&self) -> String {
        self.id.as_ref().map(|id| id.to_hex()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("DONE".parse::<BookingStatus>().is_err());
        assert!("pending".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_type_round_trip() {
        for t in [
            BookingType::Flight,
            BookingType::Hotel,
            BookingType::Tour,
            BookingType::Visa,
            BookingType::CarRental,
            BookingType::Insurance,
        ] {
            assert_eq!(t.as_str().parse::<BookingType>().unwrap(), t);
        }
        assert!("CRUISE".parse::<BookingType>().is_err());
    }

    #[test]
    fn test_booking_json_field_names() {
        let booking = Booking {
            id: Some(ObjectId::new()),
            user_id: "u1".to_string(),
            booking_type: BookingType::Flight,
            destination: "Dubai".to_string(),
            departure: None,
            return_date: None,
            travelers: 1,
            price: 1000.0,
            details: None,
            status: BookingStatus::Pending,
            created_at: None,
            updated_at: None,
        };
        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["type"], "FLIGHT");
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["status"], "PENDING");
        assert!(value.get("booking_type").is_none());
    }
}
