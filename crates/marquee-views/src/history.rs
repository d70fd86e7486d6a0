//! Past/upcoming splits for a single venue or artist page.

use chrono::NaiveDateTime;
use serde::Serialize;

use marquee_core::error::{Error, Result};
use marquee_core::model::{
    Artist, ArtistId, ScheduledShow, ShowFilter, Timing, Venue, VenueId,
};
use marquee_core::Database;

/// How start times are rendered on detail pages.
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y, %H:%M";

/// A venue's or artist's shows partitioned around an evaluation instant.
///
/// A show starting exactly at that instant is in neither list, so the two
/// counts only add up to the total when no show sits on the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowHistory<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T> ShowHistory<T> {
    /// Partition `shows` by [`Timing`], projecting each kept show with
    /// `project`. Input order is preserved within each list.
    pub fn split<I, F>(shows: I, now: NaiveDateTime, mut project: F) -> Self
    where
        I: IntoIterator<Item = ScheduledShow>,
        F: FnMut(ScheduledShow) -> T,
    {
        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();

        for show in shows {
            match show.timing(now) {
                Timing::Past => past_shows.push(project(show)),
                Timing::Upcoming => upcoming_shows.push(project(show)),
                Timing::Now => {}
            }
        }

        Self {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// A show as listed on a venue page: who plays, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueBooking {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl From<ScheduledShow> for VenueBooking {
    fn from(show: ScheduledShow) -> Self {
        Self {
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: show.start_time.format(DISPLAY_FORMAT).to_string(),
        }
    }
}

/// A show as listed on an artist page: where they play, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistBooking {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

impl From<ScheduledShow> for ArtistBooking {
    fn from(show: ScheduledShow) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            venue_image_link: show.venue_image_link,
            start_time: show.start_time.format(DISPLAY_FORMAT).to_string(),
        }
    }
}

/// Everything shown on a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub history: ShowHistory<VenueBooking>,
}

/// Everything shown on an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub history: ShowHistory<ArtistBooking>,
}

pub fn venue_detail(db: &Database, id: VenueId, now: NaiveDateTime) -> Result<VenueDetail> {
    let venue = db
        .find_venue(id)?
        .ok_or_else(|| Error::not_found("venue", id))?;
    let shows = db.list_scheduled_shows(ShowFilter::Venue(id))?;
    Ok(VenueDetail {
        venue,
        history: ShowHistory::split(shows, now, VenueBooking::from),
    })
}

pub fn artist_detail(db: &Database, id: ArtistId, now: NaiveDateTime) -> Result<ArtistDetail> {
    let artist = db
        .find_artist(id)?
        .ok_or_else(|| Error::not_found("artist", id))?;
    let shows = db.list_scheduled_shows(ShowFilter::Artist(id))?;
    Ok(ArtistDetail {
        artist,
        history: ShowHistory::split(shows, now, ArtistBooking::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use marquee_core::model::ShowId;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, 15)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn show(id: i64, start_time: NaiveDateTime) -> ScheduledShow {
        ScheduledShow {
            id: ShowId::new(id),
            start_time,
            venue_id: VenueId::new(1),
            venue_name: "The Musical Hop".to_string(),
            venue_image_link: String::new(),
            artist_id: ArtistId::new(1),
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: String::new(),
        }
    }

    #[test]
    fn test_split_partitions_around_now() {
        let shows = vec![
            show(1, now() - Duration::days(1)),
            show(2, now() + Duration::days(1)),
            show(3, now() - Duration::minutes(1)),
        ];
        let history = ShowHistory::split(shows, now(), |s| s.id);
        assert_eq!(history.past_shows, vec![ShowId::new(1), ShowId::new(3)]);
        assert_eq!(history.upcoming_shows, vec![ShowId::new(2)]);
        assert_eq!(history.past_shows_count, 2);
        assert_eq!(history.upcoming_shows_count, 1);
    }

    #[test]
    fn test_split_drops_show_starting_exactly_now() {
        let shows = vec![
            show(1, now()),
            show(2, now() + Duration::seconds(1)),
            show(3, now() - Duration::seconds(1)),
        ];
        let history = ShowHistory::split(shows, now(), |s| s.id);
        assert_eq!(history.past_shows_count, 1);
        assert_eq!(history.upcoming_shows_count, 1);
        assert!(!history.past_shows.contains(&ShowId::new(1)));
        assert!(!history.upcoming_shows.contains(&ShowId::new(1)));
    }

    #[test]
    fn test_detail_of_missing_id_names_entity() {
        let db = Database::open_in_memory().unwrap();
        let err = venue_detail(&db, VenueId::new(12), now()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: venue with id 12");
        let err = artist_detail(&db, ArtistId::new(3), now()).unwrap_err();
        assert_eq!(err.to_string(), "not found: artist with id 3");
    }

    #[test]
    fn test_booking_formats_start_time() {
        let booking = VenueBooking::from(show(1, now()));
        assert_eq!(booking.start_time, "06/15/2030, 20:00");
        assert_eq!(booking.artist_name, "Guns N Petals");
    }
}
