//! Reservation sources.
//!
//! The export pipeline does not know where reservations come from; it is
//! handed something that can fetch them. Failures of the source are opaque
//! to the rest of the crate and surface as [`StayCalError::Source`].

use std::future::Future;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::{StayCalError, StayCalResult};
use crate::reservation::Reservation;

/// Something that can hand back the current list of reservations.
pub trait ReservationSource {
    fn fetch_reservations(&self) -> impl Future<Output = StayCalResult<Vec<Reservation>>> + Send;
}

/// Reservations already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub Vec<Reservation>);

impl ReservationSource for StaticSource {
    async fn fetch_reservations(&self) -> StayCalResult<Vec<Reservation>> {
        Ok(self.0.clone())
    }
}

/// Reservations read from a JSON file, either a bare array or an object
/// with a `reservations` array.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReservationFile {
    List(Vec<Reservation>),
    Wrapped { reservations: Vec<Reservation> },
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    pub fn parse(content: &str) -> StayCalResult<Vec<Reservation>> {
        let file: ReservationFile = serde_json::from_str(content)
            .map_err(|e| StayCalError::Source(format!("Failed to parse reservations: {e}")))?;

        Ok(match file {
            ReservationFile::List(reservations) => reservations,
            ReservationFile::Wrapped { reservations } => reservations,
        })
    }
}

impl ReservationSource for JsonFileSource {
    async fn fetch_reservations(&self) -> StayCalResult<Vec<Reservation>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StayCalError::Source(format!("Could not read {}: {e}", self.path.display()))
        })?;

        let reservations = Self::parse(&content)?;
        debug!(path = %self.path.display(), count = reservations.len(), "Loaded reservations");
        Ok(reservations)
    }
}
