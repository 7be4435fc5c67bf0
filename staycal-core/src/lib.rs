//! Core of staycal: turns booking-system reservations into all-day
//! occupancy calendars.
//!
//! - `normalize` expands reservations into one `Event` per night
//! - `ics` writes (and reads back) RFC 5545 calendars
//! - `json` projects the same events for API consumers
//! - `export` wires a `ReservationSource` through both

pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod ics;
pub mod json;
pub mod normalize;
pub mod reservation;
pub mod source;

pub use error::{StayCalError, StayCalResult};
pub use event::Event;
pub use ics::generate_ics;
pub use normalize::generate_full_day_events;
pub use reservation::{Reservation, ReservationStatus};
