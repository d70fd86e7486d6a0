//! Read-only projections over the marquee entity store.
//!
//! Every function here takes a shared `&Database` and derives a view from
//! it: the venue index grouped by location, past/upcoming show splits for
//! detail pages, name search, and flat listings. The evaluation instant is
//! always passed in so results are reproducible.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod areas;
pub mod history;
pub mod listing;
pub mod search;

pub use areas::{venue_areas, Area, VenueSummary};
pub use history::{
    artist_detail, venue_detail, ArtistBooking, ArtistDetail, ShowHistory, VenueBooking,
    VenueDetail,
};
pub use listing::{list_artists, list_shows, ArtistSummary, ShowListing};
pub use search::{search_artists, search_venues, SearchResults};
