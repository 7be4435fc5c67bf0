//! ICS file generation.

use chrono::{DateTime, NaiveDate, Utc};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::error::{StayCalError, StayCalResult};
use crate::event::Event;
use crate::ics::text::{prepare_required_text, prepare_text};

pub const DEFAULT_PROD_ID: &str = "-//staycal//Booking Calendar//EN";

/// Calendar-level properties of an export.
#[derive(Debug, Clone)]
pub struct CalendarMeta {
    pub prod_id: String,
    /// Display name (X-WR-CALNAME)
    pub name: Option<String>,
    /// DTSTAMP written on every event. Fix it to get byte-identical exports.
    pub dtstamp: DateTime<Utc>,
}

impl Default for CalendarMeta {
    fn default() -> Self {
        CalendarMeta {
            prod_id: DEFAULT_PROD_ID.to_string(),
            name: None,
            dtstamp: Utc::now(),
        }
    }
}

/// Generate .ics content for a list of all-day events.
///
/// One VEVENT per event, in input order. Any event that cannot be written
/// fails the whole call.
pub fn generate_ics(events: &[Event], meta: &CalendarMeta) -> StayCalResult<String> {
    // Calendar::new() would add its own PRODID
    let mut cal = Calendar::empty();
    cal.append_property(("VERSION", "2.0"));
    cal.append_property(Property::new(
        "PRODID",
        prepare_required_text("PRODID", &meta.prod_id)?,
    ));
    cal.append_property(("CALSCALE", "GREGORIAN"));
    cal.append_property(("METHOD", "PUBLISH"));
    if let Some(ref name) = meta.name {
        // Calendar::name() writes NAME unescaped, so set the property directly
        cal.append_property(Property::new("X-WR-CALNAME", prepare_text(name)?));
    }

    let dtstamp = meta.dtstamp.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        cal.push(build_event(event, &dtstamp)?);
    }

    let cal = cal.done();
    TryInto::<String>::try_into(&cal).map_err(|e| StayCalError::Serialization(e.to_string()))
}

fn build_event(event: &Event, dtstamp: &str) -> StayCalResult<icalendar::Event> {
    if event.id.trim().is_empty() {
        return Err(StayCalError::Serialization(format!(
            "event on {} has an empty id",
            event.date
        )));
    }
    if event.title.trim().is_empty() {
        return Err(StayCalError::Serialization(format!(
            "event '{}' has an empty title",
            event.id
        )));
    }
    let end = event.end_date().ok_or_else(|| {
        StayCalError::Serialization(format!("event '{}' has no following day", event.id))
    })?;

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&prepare_text(&event.id)?);
    ics_event.add_property("DTSTAMP", dtstamp);
    add_date_property(&mut ics_event, "DTSTART", event.date);
    add_date_property(&mut ics_event, "DTEND", end);
    ics_event.summary(&prepare_text(&event.title)?);
    if let Some(ref description) = event.description {
        ics_event.description(&prepare_text(description)?);
    }
    ics_event.add_property("TRANSP", "OPAQUE");

    Ok(ics_event.done())
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
