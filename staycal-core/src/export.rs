//! Export pipeline: fetch reservations, normalize, serialize.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::StayCalConfig;
use crate::error::{StayCalError, StayCalResult};
use crate::ics::{CalendarMeta, generate_ics};
use crate::json::generate_json;
use crate::normalize::{EventNormalizer, RejectedReservation};
use crate::source::ReservationSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Ics,
    Json,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Ics => "text/calendar; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Ics => "ics",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = StayCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ics" | "ical" | "icalendar" => Ok(ExportFormat::Ics),
            "json" => Ok(ExportFormat::Json),
            other => Err(StayCalError::Config(format!(
                "Unknown export format '{other}'. Expected 'ics' or 'json'"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Everything an export needs besides the reservations themselves.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub config: StayCalConfig,
    /// Base name of the generated file, without extension
    pub file_stem: String,
    /// Fixed DTSTAMP for reproducible output; `None` uses the current time
    pub dtstamp: Option<DateTime<Utc>>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            config: StayCalConfig::default(),
            file_stem: "calendar".to_string(),
            dtstamp: None,
        }
    }
}

/// A finished export, ready to be written or sent.
#[derive(Debug)]
pub struct Export {
    pub body: String,
    pub content_type: &'static str,
    pub file_name: String,
    pub event_count: usize,
    pub rejected: Vec<RejectedReservation>,
}

/// Fetch reservations from `source` and render them in `format`.
///
/// Rejected reservations do not fail the export; they are returned in
/// [`Export::rejected`]. Source and serialization failures do.
pub async fn export<S: ReservationSource>(
    source: &S,
    format: ExportFormat,
    settings: &ExportSettings,
) -> StayCalResult<Export> {
    let reservations = source.fetch_reservations().await?;

    let normalizer = EventNormalizer::new(settings.config.normalize_options());
    let normalized = normalizer.normalize(&reservations);

    let body = match format {
        ExportFormat::Ics => {
            let meta = CalendarMeta {
                prod_id: settings.config.prod_id.clone(),
                name: settings.config.calendar_name.clone(),
                dtstamp: settings.dtstamp.unwrap_or_else(Utc::now),
            };
            generate_ics(&normalized.events, &meta)?
        }
        ExportFormat::Json => generate_json(&normalized.events)?,
    };

    if !normalized.rejected.is_empty() {
        warn!(count = normalized.rejected.len(), "Some reservations were skipped");
    }
    info!(
        format = %format,
        reservations = reservations.len(),
        events = normalized.events.len(),
        "Export generated"
    );

    Ok(Export {
        body,
        content_type: format.content_type(),
        file_name: format!("{}.{}", settings.file_stem, format.extension()),
        event_count: normalized.events.len(),
        rejected: normalized.rejected,
    })
}
