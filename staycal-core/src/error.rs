//! Error types for staycal.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while turning reservations into calendar exports.
#[derive(Error, Debug)]
pub enum StayCalError {
    #[error("Reservation '{reservation_id}' has check-out {check_out} not after check-in {check_in}")]
    InvalidDateRange {
        reservation_id: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Reservation has an empty id")]
    MissingReservationId,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Reservation source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for staycal operations.
pub type StayCalResult<T> = Result<T, StayCalError>;
