//! Reading exported calendars back, using the icalendar crate's parser.

use chrono::NaiveDate;
use icalendar::DatePerhapsTime;
use icalendar::parser::{Component, read_calendar, unfold};

use crate::error::{StayCalError, StayCalResult};

/// An all-day VEVENT as read from .ics text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub uid: String,
    pub date: NaiveDate,
    /// Exclusive end date
    pub end_date: NaiveDate,
    pub summary: String,
    pub description: Option<String>,
}

impl ParsedEvent {
    /// Every day covered by `[date, end_date)`.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.date
            .iter_days()
            .take_while(|d| *d < self.end_date)
            .collect()
    }
}

/// Parse every VEVENT of a calendar, in document order.
///
/// TEXT values come back unescaped by the icalendar parser. Only date-valued
/// (all-day) events are accepted. A DTEND missing from an all-day event means
/// it lasts one day.
pub fn parse_calendar(content: &str) -> StayCalResult<Vec<ParsedEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| StayCalError::IcsParse(e.to_string()))?;

    let mut vevents = Vec::new();
    for component in &calendar.components {
        collect_vevents(component, &mut vevents);
    }

    vevents.into_iter().map(parse_vevent).collect()
}

fn collect_vevents<'c, 'a>(component: &'c Component<'a>, out: &mut Vec<&'c Component<'a>>) {
    if component.name == "VEVENT" {
        out.push(component);
        return;
    }
    for child in &component.components {
        collect_vevents(child, out);
    }
}

fn parse_vevent(vevent: &Component<'_>) -> StayCalResult<ParsedEvent> {
    let uid = vevent
        .find_prop("UID")
        .map(|p| p.val.to_string())
        .ok_or_else(|| StayCalError::IcsParse("VEVENT without UID".into()))?;

    let date = find_date(vevent, "DTSTART")?
        .ok_or_else(|| StayCalError::IcsParse(format!("VEVENT '{uid}' has no DTSTART")))?;
    let end_date = match find_date(vevent, "DTEND")? {
        Some(end) => end,
        None => date
            .succ_opt()
            .ok_or_else(|| StayCalError::IcsParse(format!("VEVENT '{uid}' has no end")))?,
    };

    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_default();
    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| p.val.to_string());

    Ok(ParsedEvent {
        uid,
        date,
        end_date,
        summary,
        description,
    })
}

fn find_date(vevent: &Component<'_>, name: &str) -> StayCalResult<Option<NaiveDate>> {
    let Some(prop) = vevent.find_prop(name) else {
        return Ok(None);
    };

    match DatePerhapsTime::try_from(prop) {
        Ok(DatePerhapsTime::Date(date)) => Ok(Some(date)),
        Ok(DatePerhapsTime::DateTime(_)) => Err(StayCalError::IcsParse(format!(
            "{name} is a date-time, expected an all-day date"
        ))),
        Err(_) => Err(StayCalError::IcsParse(format!(
            "invalid {name} value '{}'",
            prop.val.as_ref()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::ics::{CalendarMeta, generate_ics};
    use crate::normalize::generate_full_day_events;
    use crate::reservation::Reservation;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_trip_reproduces_dates() {
        let mut first = Reservation::new("r1", date(2024, 6, 1), date(2024, 6, 4));
        first.guest_name = Some("Smith, John; VIP".to_string());
        let second = Reservation::new("r2", date(2024, 12, 30), date(2025, 1, 2));

        let events = generate_full_day_events(&[first, second]).events;
        let ics = generate_ics(&events, &CalendarMeta::default()).unwrap();
        let parsed = parse_calendar(&ics).unwrap();

        let expected: Vec<NaiveDate> = events.iter().map(|e| e.date).collect();
        let covered: Vec<NaiveDate> = parsed.iter().flat_map(ParsedEvent::days).collect();
        assert_eq!(covered, expected);

        let uids: Vec<&str> = parsed.iter().map(|p| p.uid.as_str()).collect();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(uids, ids);
    }

    #[test]
    fn test_round_trip_restores_escaped_text() {
        let long = "Long title with, commas; and ünïcödé ".repeat(5).trim_end().to_string();
        let titles = [
            "Smith, John; VIP",
            r"Back\slash",
            "Two\nlines",
            long.as_str(),
        ];

        let events: Vec<Event> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let day = date(2024, 7, 1 + i as u32);
                Event {
                    id: Event::id_for("r,1", day),
                    date: day,
                    title: title.to_string(),
                    description: Some(format!("Reservation: r,1\nTitle: {title}")),
                    source_reservation_id: "r,1".to_string(),
                }
            })
            .collect();

        let ics = generate_ics(&events, &CalendarMeta::default()).unwrap();
        let parsed = parse_calendar(&ics).unwrap();

        assert_eq!(parsed.len(), events.len());
        for (event, parsed) in events.iter().zip(&parsed) {
            assert_eq!(parsed.summary, event.title);
            assert_eq!(parsed.uid, event.id);
            assert_eq!(parsed.description, event.description);
        }
    }

    #[test]
    fn test_round_trip_keeps_literal_backslash_sequences() {
        let texts = [r"Room 1\n2", r"a\,b", r"x\;y", r"C:\\path", r"ends with \"];

        let events: Vec<Event> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let day = date(2024, 8, 1 + i as u32);
                Event {
                    id: Event::id_for(r"r\n1", day),
                    date: day,
                    title: text.to_string(),
                    description: Some(format!(r"Note: {text}\N")),
                    source_reservation_id: r"r\n1".to_string(),
                }
            })
            .collect();

        let ics = generate_ics(&events, &CalendarMeta::default()).unwrap();
        let parsed = parse_calendar(&ics).unwrap();

        assert_eq!(parsed.len(), events.len());
        for (event, parsed) in events.iter().zip(&parsed) {
            assert_eq!(parsed.summary, event.title);
            assert!(!parsed.summary.contains('\n'));
            assert_eq!(parsed.uid, event.id);
            assert_eq!(parsed.description, event.description);
        }
    }

    #[test]
    fn test_carriage_returns_read_back_as_newlines() {
        let day = date(2024, 6, 1);
        let event = Event {
            id: Event::id_for("r1", day),
            date: day,
            title: "Line one\rLine two".to_string(),
            description: Some("Guests: 2\r\nPets: 0\r".to_string()),
            source_reservation_id: "r1".to_string(),
        };

        let ics = generate_ics(&[event], &CalendarMeta::default()).unwrap();
        let parsed = parse_calendar(&ics).unwrap();

        assert_eq!(parsed[0].summary, "Line one\nLine two");
        assert_eq!(parsed[0].description.as_deref(), Some("Guests: 2\nPets: 0\n"));
    }

    #[test]
    fn test_empty_calendar_has_no_events() {
        let ics = generate_ics(&[], &CalendarMeta::default()).unwrap();
        assert!(parse_calendar(&ics).unwrap().is_empty());
    }

    #[test]
    fn test_missing_dtend_defaults_to_one_day() {
        let ics = "BEGIN:VCALENDAR\r\n\
                   VERSION:2.0\r\n\
                   PRODID:test\r\n\
                   BEGIN:VEVENT\r\n\
                   UID:x-1\r\n\
                   DTSTART;VALUE=DATE:20240601\r\n\
                   SUMMARY:Occupied\r\n\
                   END:VEVENT\r\n\
                   END:VCALENDAR\r\n";

        let parsed = parse_calendar(ics).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].days(), vec![date(2024, 6, 1)]);
    }

    #[test]
    fn test_timed_event_is_rejected() {
        let ics = "BEGIN:VCALENDAR\r\n\
                   VERSION:2.0\r\n\
                   PRODID:test\r\n\
                   BEGIN:VEVENT\r\n\
                   UID:x-1\r\n\
                   DTSTART:20240601T100000Z\r\n\
                   DTEND:20240601T110000Z\r\n\
                   SUMMARY:Meeting\r\n\
                   END:VEVENT\r\n\
                   END:VCALENDAR\r\n";

        assert!(matches!(parse_calendar(ics), Err(StayCalError::IcsParse(_))));
    }
}
