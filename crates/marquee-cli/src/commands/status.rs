use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};

use marquee_core::model::{ShowFilter, Timing};
use marquee_core::Database;

use super::print_json;

#[derive(Debug, Serialize)]
struct StoreStatus {
    database: PathBuf,
    venues: usize,
    artists: usize,
    shows: usize,
    upcoming_shows: usize,
}

pub fn show_status(db: &Database, db_path: &Path, now: NaiveDateTime) -> Result<()> {
    let upcoming_shows = db
        .list_scheduled_shows(ShowFilter::All)?
        .iter()
        .filter(|show| show.timing(now) == Timing::Upcoming)
        .count();

    print_json(&StoreStatus {
        database: db_path.to_path_buf(),
        venues: db.count_venues()?,
        artists: db.count_artists()?,
        shows: db.count_shows()?,
        upcoming_shows,
    })
}
