//! The venue index: venues grouped by city and state.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

use marquee_core::error::Result;
use marquee_core::model::{ScheduledShow, ShowFilter, Timing, Venue, VenueId};
use marquee_core::Database;

/// One venue line in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: VenueId,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues sharing one `(city, state)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Group every venue by location, with its count of upcoming shows.
///
/// Areas appear in the order their first venue appears in the store and
/// venues keep store order inside an area. City and state are compared
/// exactly.
pub fn venue_areas(db: &Database, now: NaiveDateTime) -> Result<Vec<Area>> {
    let venues = db.list_venues()?;
    let shows = db.list_scheduled_shows(ShowFilter::All)?;
    let counts = upcoming_counts(&shows, now);
    log::debug!(
        "Grouping {} venues with {} upcoming shows",
        venues.len(),
        counts.values().sum::<usize>()
    );
    Ok(group_by_area(venues, &counts))
}

/// Number of shows strictly after `now`, per venue.
pub fn upcoming_counts(shows: &[ScheduledShow], now: NaiveDateTime) -> HashMap<VenueId, usize> {
    let mut counts = HashMap::new();
    for show in shows {
        if show.timing(now) == Timing::Upcoming {
            *counts.entry(show.venue_id).or_insert(0) += 1;
        }
    }
    counts
}

pub fn group_by_area(venues: Vec<Venue>, upcoming: &HashMap<VenueId, usize>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for venue in venues {
        let summary = VenueSummary {
            id: venue.id,
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
            name: venue.name,
        };
        let key = (venue.city, venue.state);
        if let Some(&slot) = index.get(&key) {
            areas[slot].venues.push(summary);
        } else {
            index.insert(key.clone(), areas.len());
            areas.push(Area {
                city: key.0,
                state: key.1,
                venues: vec![summary],
            });
        }
    }

    areas
}
