//! Reservation to full-day event normalization.
//!
//! Every valid reservation expands into one [`Event`] per night of the
//! half-open stay `[check_in, check_out)`. Reservations are never merged with
//! each other: two overlapping stays both keep their full set of days, since
//! the booking system is the authority on whether a double booking is real.

use tracing::{debug, warn};

use crate::error::StayCalError;
use crate::event::Event;
use crate::reservation::{Reservation, ReservationStatus};

pub const DEFAULT_TITLE: &str = "Occupied";

/// Controls how reservations are turned into events.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Use the guest name as event title when available
    pub show_guest_names: bool,
    /// Title used when the guest name is absent or hidden
    pub default_title: String,
    /// Reservations with these statuses produce no events
    pub exclude_statuses: Vec<ReservationStatus>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            show_guest_names: true,
            default_title: DEFAULT_TITLE.to_string(),
            exclude_statuses: Vec::new(),
        }
    }
}

/// A reservation that was skipped, with the reason it could not be used.
#[derive(Debug)]
pub struct RejectedReservation {
    pub reservation_id: String,
    pub reason: StayCalError,
}

/// Result of a normalization pass: the events of every valid reservation,
/// plus the reservations that were rejected.
#[derive(Debug, Default)]
pub struct Normalized {
    pub events: Vec<Event>,
    pub rejected: Vec<RejectedReservation>,
}

#[derive(Debug, Clone, Default)]
pub struct EventNormalizer {
    options: NormalizeOptions,
}

impl EventNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        EventNormalizer { options }
    }

    /// Expand reservations into events, in input order and then date order.
    ///
    /// A malformed reservation is recorded in [`Normalized::rejected`] and
    /// the rest of the batch is still processed.
    pub fn normalize(&self, reservations: &[Reservation]) -> Normalized {
        let mut rejected = Vec::new();
        let mut accepted = Vec::with_capacity(reservations.len());

        for reservation in reservations {
            if let Err(reason) = validate(reservation) {
                warn!(reservation_id = %reservation.id, error = %reason, "Skipping reservation");
                rejected.push(RejectedReservation {
                    reservation_id: reservation.id.clone(),
                    reason,
                });
                continue;
            }

            if let Some(status) = reservation.status
                && self.options.exclude_statuses.contains(&status)
            {
                debug!(reservation_id = %reservation.id, status = status.as_str(), "Excluded by status");
                continue;
            }

            accepted.push(reservation);
        }

        let total_nights: usize = accepted.iter().map(|r| r.nights()).sum();
        let mut events = Vec::with_capacity(total_nights);

        for reservation in accepted {
            let title = self.title_for(reservation);
            let description = describe(reservation);

            let mut day = reservation.check_in;
            while day < reservation.check_out {
                events.push(Event {
                    id: Event::id_for(&reservation.id, day),
                    date: day,
                    title: title.clone(),
                    description: Some(description.clone()),
                    source_reservation_id: reservation.id.clone(),
                });

                match day.succ_opt() {
                    Some(next) => day = next,
                    None => break,
                }
            }
        }

        debug!(
            reservations = reservations.len(),
            events = events.len(),
            rejected = rejected.len(),
            "Normalized reservations"
        );

        Normalized { events, rejected }
    }

    fn title_for(&self, reservation: &Reservation) -> String {
        let guest_name = reservation
            .guest_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        match guest_name {
            Some(name) if self.options.show_guest_names => name.to_string(),
            _ => self.options.default_title.clone(),
        }
    }
}

/// Normalize with default options.
pub fn generate_full_day_events(reservations: &[Reservation]) -> Normalized {
    EventNormalizer::default().normalize(reservations)
}

fn validate(reservation: &Reservation) -> Result<(), StayCalError> {
    if reservation.id.trim().is_empty() {
        return Err(StayCalError::MissingReservationId);
    }

    if reservation.check_in >= reservation.check_out {
        return Err(StayCalError::InvalidDateRange {
            reservation_id: reservation.id.clone(),
            check_in: reservation.check_in,
            check_out: reservation.check_out,
        });
    }

    Ok(())
}

/// Multi-line summary of the reservation carried as event description.
fn describe(reservation: &Reservation) -> String {
    let mut lines = vec![format!("Reservation: {}", reservation.id)];

    if let Some(ref property) = reservation.property_id {
        lines.push(format!("Property: {property}"));
    }
    if let Some(status) = reservation.status {
        lines.push(format!("Status: {}", status.as_str()));
    }
    if let Some(ref channel) = reservation.channel {
        lines.push(format!("Channel: {channel}"));
    }
    if let Some(guests) = reservation.guests {
        lines.push(format!("Guests: {guests}"));
    }
    lines.push(format!(
        "Stay: {} to {}",
        reservation.check_in.format("%Y-%m-%d"),
        reservation.check_out.format("%Y-%m-%d")
    ));

    lines.join("\n")
}
