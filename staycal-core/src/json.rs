//! JSON projection of the event list for programmatic consumers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{StayCalError, StayCalResult};
use crate::event::Event;

/// One occupied day as exposed over JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
}

impl From<&Event> for JsonEvent {
    fn from(event: &Event) -> Self {
        JsonEvent {
            id: event.id.clone(),
            date: event.date,
            title: event.title.clone(),
            description: event.description.clone(),
        }
    }
}

pub fn to_json_events(events: &[Event]) -> Vec<JsonEvent> {
    events.iter().map(JsonEvent::from).collect()
}

/// Serialize events as a pretty-printed JSON array, in input order.
pub fn generate_json(events: &[Event]) -> StayCalResult<String> {
    serde_json::to_string_pretty(&to_json_events(events))
        .map_err(|e| StayCalError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::{CalendarMeta, generate_ics, parse_calendar};
    use crate::normalize::generate_full_day_events;
    use crate::reservation::Reservation;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_json_shape() {
        let event = Event {
            id: "r1-2024-06-01".to_string(),
            date: date(2024, 6, 1),
            title: "Smith, John; VIP".to_string(),
            description: None,
            source_reservation_id: "r1".to_string(),
        };

        let value: serde_json::Value = serde_json::from_str(&generate_json(&[event]).unwrap()).unwrap();

        assert_eq!(
            value,
            json!([{
                "id": "r1-2024-06-01",
                "date": "2024-06-01",
                "title": "Smith, John; VIP",
                "description": null
            }])
        );
    }

    #[test]
    fn test_empty_list_is_empty_array() {
        assert_eq!(generate_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_json_and_ics_agree_on_occupied_days() {
        let reservations = vec![
            Reservation::new("r1", date(2024, 6, 1), date(2024, 6, 4)),
            Reservation::new("r2", date(2024, 6, 3), date(2024, 6, 5)),
            Reservation::new("bad", date(2024, 6, 9), date(2024, 6, 9)),
        ];
        let events = generate_full_day_events(&reservations).events;

        let json_days: Vec<NaiveDate> =
            serde_json::from_str::<Vec<JsonEvent>>(&generate_json(&events).unwrap())
                .unwrap()
                .into_iter()
                .map(|e| e.date)
                .collect();
        let ics_days: Vec<NaiveDate> =
            parse_calendar(&generate_ics(&events, &CalendarMeta::default()).unwrap())
                .unwrap()
                .iter()
                .map(|e| e.date)
                .collect();

        assert_eq!(json_days, ics_days);
        assert_eq!(json_days.len(), 5);
    }
}
