//! Flat listings: every show, every artist.

use serde::Serialize;

use marquee_core::error::Result;
use marquee_core::model::show::STORAGE_FORMAT;
use marquee_core::model::{ArtistId, ScheduledShow, ShowFilter, ShowId, VenueId};
use marquee_core::Database;

/// One row of the shows page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub id: ShowId,
    pub venue_id: VenueId,
    pub venue_name: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl From<ScheduledShow> for ShowListing {
    fn from(show: ScheduledShow) -> Self {
        Self {
            id: show.id,
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: show.start_time.format(STORAGE_FORMAT).to_string(),
        }
    }
}

/// One row of the artists page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: ArtistId,
    pub name: String,
}

/// Every show in chronological order.
pub fn list_shows(db: &Database) -> Result<Vec<ShowListing>> {
    Ok(db
        .list_scheduled_shows(ShowFilter::All)?
        .into_iter()
        .map(ShowListing::from)
        .collect())
}

/// Every artist in store order.
pub fn list_artists(db: &Database) -> Result<Vec<ArtistSummary>> {
    Ok(db
        .list_artists()?
        .into_iter()
        .map(|artist| ArtistSummary {
            id: artist.id,
            name: artist.name,
        })
        .collect())
}
