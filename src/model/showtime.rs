use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Showtimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShowtimeId(pub u32);

impl From<u32> for ShowtimeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ShowtimeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "showtime_{}", self.0)
    }
}

/// A screening of a movie in a hall.
///
/// Tickets point at their showtime; the showtime does not own them. It only acts as a
/// timing gate for the stale ticket sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Showtime {
    pub id: ShowtimeId,
    pub movie: String,
    pub hall: String,
    pub start_at: DateTime<Utc>,
}

impl Showtime {
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start_at < now
    }
}

/// Payload for scheduling a showtime.
#[derive(Debug, Clone)]
pub struct ShowtimeCreate {
    pub movie: String,
    pub hall: String,
    pub start_at: DateTime<Utc>,
}

/// Filters for listing showtimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowtimeQuery {
    StartedBefore(DateTime<Utc>),
}
