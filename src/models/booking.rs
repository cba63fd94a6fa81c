use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A client's request for a photo shoot on a given date. Immutable once
/// created; there is no update or delete path in this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub booking_date: NaiveDate,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub service_type: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            _ => BookingStatus::Pending,
        }
    }
}
