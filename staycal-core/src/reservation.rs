//! Reservation records as handed over by the booking system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A guest's stay. `check_out` is exclusive: the guest occupies the unit
/// through the night before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,

    /// Unit the stay belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    /// Booking channel, e.g. "airbnb" or "direct"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Number of guests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
}

impl Reservation {
    pub fn new(id: &str, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Reservation {
            id: id.to_string(),
            check_in,
            check_out,
            property_id: None,
            guest_name: None,
            status: None,
            channel: None,
            guests: None,
        }
    }

    /// Number of nights in `[check_in, check_out)`, zero for malformed ranges.
    pub fn nights(&self) -> usize {
        let days = (self.check_out - self.check_in).num_days();
        usize::try_from(days).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReservationStatus {
    Accepted,
    Pending,
    Cancelled,
    Denied,
    CheckedIn,
    CheckedOut,
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Accepted => "accepted",
            ReservationStatus::Pending => "pending",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Denied => "denied",
            ReservationStatus::CheckedIn => "checked in",
            ReservationStatus::CheckedOut => "checked out",
            ReservationStatus::Unknown => "unknown",
        }
    }
}
