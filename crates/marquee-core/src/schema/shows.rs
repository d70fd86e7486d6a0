use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::model::show::{ENTITY, STORAGE_FORMAT};
use crate::model::{ArtistId, NewShow, ScheduledShow, Show, ShowFilter, ShowId, VenueId};

use super::db::{row_exists, Database};

// Show scheduling and lookup
impl Database {
    /// Schedule a show.
    ///
    /// Both references are checked inside the transaction; a missing artist
    /// or venue fails with [`Error::ConstraintViolation`] and nothing is
    /// written. Overlapping bookings are allowed.
    pub fn insert_show(&mut self, new: &NewShow) -> Result<Show> {
        let show = self.write(ENTITY, |tx| {
            if !row_exists(tx, "artists", new.artist_id.get())? {
                return Err(Error::constraint(
                    ENTITY,
                    format!("artist {} does not exist", new.artist_id),
                ));
            }
            if !row_exists(tx, "venues", new.venue_id.get())? {
                return Err(Error::constraint(
                    ENTITY,
                    format!("venue {} does not exist", new.venue_id),
                ));
            }

            tx.execute(
                "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?1, ?2, ?3)",
                params![
                    new.artist_id,
                    new.venue_id,
                    new.start_time.format(STORAGE_FORMAT).to_string(),
                ],
            )?;

            Ok(Show {
                id: ShowId::new(tx.last_insert_rowid()),
                artist_id: new.artist_id,
                venue_id: new.venue_id,
                start_time: new.start_time,
            })
        })?;

        log::info!(
            "Show {} was successfully listed: artist {} at venue {} on {}",
            show.id,
            show.artist_id,
            show.venue_id,
            show.start_time
        );
        Ok(show)
    }

    pub fn find_show(&self, id: ShowId) -> Result<Option<Show>> {
        let show = self
            .conn()
            .query_row(
                "SELECT id, artist_id, venue_id, start_time FROM shows WHERE id = ?1",
                [id],
                |row| {
                    Ok(Show {
                        id: row.get(0)?,
                        artist_id: row.get(1)?,
                        venue_id: row.get(2)?,
                        start_time: read_start_time(row, 3)?,
                    })
                },
            )
            .optional()?;
        Ok(show)
    }

    /// Shows joined with both parties, in chronological order.
    pub fn list_scheduled_shows(&self, filter: ShowFilter) -> Result<Vec<ScheduledShow>> {
        let (venue_id, artist_id): (Option<VenueId>, Option<ArtistId>) = match filter {
            ShowFilter::All => (None, None),
            ShowFilter::Venue(id) => (Some(id), None),
            ShowFilter::Artist(id) => (None, Some(id)),
        };

        let mut stmt = self.conn().prepare(
            "SELECT s.id, s.start_time,
                    v.id, v.name, v.image_link,
                    a.id, a.name, a.image_link
             FROM shows s
             INNER JOIN venues v ON v.id = s.venue_id
             INNER JOIN artists a ON a.id = s.artist_id
             WHERE (?1 IS NULL OR s.venue_id = ?1)
               AND (?2 IS NULL OR s.artist_id = ?2)
             ORDER BY s.start_time, s.id",
        )?;

        let shows = stmt
            .query_map(params![venue_id, artist_id], row_to_scheduled_show)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(shows)
    }
}

fn row_to_scheduled_show(row: &Row<'_>) -> rusqlite::Result<ScheduledShow> {
    Ok(ScheduledShow {
        id: row.get(0)?,
        start_time: read_start_time(row, 1)?,
        venue_id: row.get(2)?,
        venue_name: row.get(3)?,
        venue_image_link: row.get(4)?,
        artist_id: row.get(5)?,
        artist_name: row.get(6)?,
        artist_image_link: row.get(7)?,
    })
}

fn read_start_time(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, STORAGE_FORMAT)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}
