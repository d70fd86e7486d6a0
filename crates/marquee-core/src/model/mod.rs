pub mod artist;
pub mod genres;
pub mod ids;
pub mod show;
pub mod venue;

pub use artist::{Artist, ArtistEdit, NewArtist};
pub use genres::Genres;
pub use ids::{ArtistId, ShowId, VenueId};
pub use show::{parse_start_time, NewShow, ScheduledShow, Show, ShowFilter, Timing};
pub use venue::{NewVenue, Venue, VenueEdit};

use crate::error::{Error, Result};

/// Fail with a validation error when a required text field is blank.
pub(crate) fn require_text(entity: &'static str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::validation(entity, format!("{field} is required")))
    } else {
        Ok(())
    }
}
