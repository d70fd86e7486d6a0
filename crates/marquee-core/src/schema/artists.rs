use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::model::artist::ENTITY;
use crate::model::genres::Genres;
use crate::model::{Artist, ArtistEdit, ArtistId, NewArtist};

use super::db::Database;

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, website, facebook_link, image_link, \
                              genres, seeking_venue, seeking_description";

// Artist CRUD
impl Database {
    /// List a new artist and return it with its generated id.
    pub fn insert_artist(&mut self, new: &NewArtist) -> Result<Artist> {
        let mut artist = new.clone().into_record()?;
        let genres = artist.genres.to_storage()?;

        let id = self.write(ENTITY, |tx| {
            tx.execute(
                "INSERT INTO artists (
                    name, city, state, phone, website, facebook_link, image_link,
                    genres, seeking_venue, seeking_description
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    artist.name,
                    artist.city,
                    artist.state,
                    artist.phone,
                    artist.website,
                    artist.facebook_link,
                    artist.image_link,
                    genres,
                    artist.seeking_venue,
                    artist.seeking_description,
                ],
            )?;
            Ok(ArtistId::new(tx.last_insert_rowid()))
        })?;

        artist.id = id;
        log::info!("Artist {} was successfully listed (id {})", artist.name, artist.id);
        Ok(artist)
    }

    /// Look up one artist. `Ok(None)` means the id does not exist.
    pub fn find_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
        load_artist(self.conn(), id)
    }

    /// All artists in store order.
    pub fn list_artists(&self) -> Result<Vec<Artist>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id"))?;
        let artists = stmt
            .query_map([], row_to_artist)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(artists)
    }

    pub fn update_artist(&mut self, id: ArtistId, edit: &ArtistEdit) -> Result<Artist> {
        edit.check_required()?;

        self.write(ENTITY, |tx| {
            let mut artist =
                load_artist(tx, id)?.ok_or_else(|| Error::not_found(ENTITY, id))?;
            edit.apply_to(&mut artist)?;
            tx.execute(
                "UPDATE artists SET
                    name = ?2, city = ?3, state = ?4, phone = ?5, website = ?6,
                    facebook_link = ?7, image_link = ?8, genres = ?9,
                    seeking_venue = ?10, seeking_description = ?11
                 WHERE id = ?1",
                params![
                    artist.id,
                    artist.name,
                    artist.city,
                    artist.state,
                    artist.phone,
                    artist.website,
                    artist.facebook_link,
                    artist.image_link,
                    artist.genres.to_storage()?,
                    artist.seeking_venue,
                    artist.seeking_description,
                ],
            )?;
            Ok(artist)
        })
    }

    /// Delete an artist together with its shows.
    pub fn delete_artist(&mut self, id: ArtistId) -> Result<usize> {
        let removed_shows = self.write(ENTITY, |tx| {
            let shows: i64 = tx.query_row(
                "SELECT COUNT(*) FROM shows WHERE artist_id = ?1",
                [id],
                |row| row.get(0),
            )?;
            if tx.execute("DELETE FROM artists WHERE id = ?1", [id])? == 0 {
                return Err(Error::not_found(ENTITY, id));
            }
            Ok(usize::try_from(shows).unwrap_or_default())
        })?;

        log::info!("Deleted artist {id} and {removed_shows} show(s)");
        Ok(removed_shows)
    }
}

fn load_artist(conn: &Connection, id: ArtistId) -> Result<Option<Artist>> {
    let artist = conn
        .query_row(
            &format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?1"),
            [id],
            row_to_artist,
        )
        .optional()?;
    Ok(artist)
}

fn row_to_artist(row: &Row<'_>) -> rusqlite::Result<Artist> {
    let genres: String = row.get(8)?;
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        phone: row.get(4)?,
        website: row.get(5)?,
        facebook_link: row.get(6)?,
        image_link: row.get(7)?,
        genres: Genres::from_storage(&genres),
        seeking_venue: row.get(9)?,
        seeking_description: row.get(10)?,
    })
}
