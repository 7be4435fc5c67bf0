//! ICS file generation and parsing.
//!
//! This module writes and reads .ics files according to RFC 5545.

mod generate;
mod parse;
mod text;

pub use generate::{CalendarMeta, DEFAULT_PROD_ID, generate_ics};
pub use parse::{ParsedEvent, parse_calendar};
