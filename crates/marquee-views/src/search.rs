//! Case-insensitive substring search over names.

use serde::Serialize;

use marquee_core::error::Result;
use marquee_core::model::{Artist, Venue};
use marquee_core::Database;

/// Search response: the matches and how many there were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> SearchResults<T> {
    fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Whether `name` contains `term`, ignoring case. A blank term matches
/// every name; otherwise the term is matched as given, spaces included.
pub fn name_matches(name: &str, term: &str) -> bool {
    term.trim().is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

/// Venues whose name contains `term`, in store order.
pub fn search_venues(db: &Database, term: &str) -> Result<SearchResults<Venue>> {
    let matches: Vec<Venue> = db
        .list_venues()?
        .into_iter()
        .filter(|venue| name_matches(&venue.name, term))
        .collect();
    log::debug!("Venue search {term:?} matched {}", matches.len());
    Ok(SearchResults::new(matches))
}

/// Artists whose name contains `term`, in store order.
pub fn search_artists(db: &Database, term: &str) -> Result<SearchResults<Artist>> {
    let matches: Vec<Artist> = db
        .list_artists()?
        .into_iter()
        .filter(|artist| name_matches(&artist.name, term))
        .collect();
    log::debug!("Artist search {term:?} matched {}", matches.len());
    Ok(SearchResults::new(matches))
}
