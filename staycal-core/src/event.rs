//! Canonical all-day occupancy events.
//!
//! The normalizer produces these from reservations; the ICS and JSON
//! exporters only ever read them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One occupied calendar day belonging to a single reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// `<reservation id>-<YYYY-MM-DD>`, stable across regenerations
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    /// Back-reference for traceability, not ownership
    pub source_reservation_id: String,
}

impl Event {
    pub fn id_for(reservation_id: &str, date: NaiveDate) -> String {
        format!("{}-{}", reservation_id, date.format("%Y-%m-%d"))
    }

    /// Exclusive end of the all-day span, `None` past the last representable date.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.date.succ_opt()
    }
}
