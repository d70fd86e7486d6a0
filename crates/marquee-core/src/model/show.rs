use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::model::ids::{ArtistId, ShowId, VenueId};

pub(crate) const ENTITY: &str = "show";

/// Column format for `start_time`. Lexical order matches chronological order;
/// the fraction is only written when the time has one.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Accepted input forms besides RFC 3339.
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a user-supplied start time.
///
/// Naive forms are taken as-is; RFC 3339 input is converted to UTC and the
/// offset dropped.
pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    for format in INPUT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .map_err(|_| Error::validation(ENTITY, format!("unparseable start time: {raw:?}")))
}

/// Where a show sits relative to an evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    Past,
    /// Starts exactly at the evaluation instant; neither past nor upcoming.
    Now,
    Upcoming,
}

impl Timing {
    #[must_use]
    pub fn classify(start_time: NaiveDateTime, now: NaiveDateTime) -> Self {
        match start_time.cmp(&now) {
            Ordering::Less => Self::Past,
            Ordering::Equal => Self::Now,
            Ordering::Greater => Self::Upcoming,
        }
    }
}

/// A scheduled event linking one artist to one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: NaiveDateTime,
}

impl Show {
    #[must_use]
    pub fn timing(&self, now: NaiveDateTime) -> Timing {
        Timing::classify(self.start_time, now)
    }
}

/// Input for scheduling a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShow {
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: NaiveDateTime,
}

impl NewShow {
    #[must_use]
    pub fn new(artist_id: ArtistId, venue_id: VenueId, start_time: NaiveDateTime) -> Self {
        Self {
            artist_id,
            venue_id,
            start_time,
        }
    }

    /// Build from raw form input, failing with a validation error when the
    /// start time cannot be read.
    pub fn parse(artist_id: ArtistId, venue_id: VenueId, start_time: &str) -> Result<Self> {
        Ok(Self::new(artist_id, venue_id, parse_start_time(start_time)?))
    }
}

/// A show joined with the names and images of both parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledShow {
    pub id: ShowId,
    pub start_time: NaiveDateTime,
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
}

impl ScheduledShow {
    #[must_use]
    pub fn timing(&self, now: NaiveDateTime) -> Timing {
        Timing::classify(self.start_time, now)
    }
}

/// Which shows to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFilter {
    All,
    Venue(VenueId),
    Artist(ArtistId),
}
