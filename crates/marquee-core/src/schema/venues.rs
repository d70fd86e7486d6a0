use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::model::genres::Genres;
use crate::model::venue::ENTITY;
use crate::model::{NewVenue, Venue, VenueEdit, VenueId};

use super::db::Database;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, website, facebook_link, \
                             image_link, genres, seeking_talent, seeking_description";

// Venue CRUD
impl Database {
    /// List a new venue and return it with its generated id.
    pub fn insert_venue(&mut self, new: &NewVenue) -> Result<Venue> {
        let mut venue = new.clone().into_record()?;
        let genres = venue.genres.to_storage()?;

        let id = self.write(ENTITY, |tx| {
            tx.execute(
                "INSERT INTO venues (
                    name, city, state, address, phone, website, facebook_link,
                    image_link, genres, seeking_talent, seeking_description
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    venue.name,
                    venue.city,
                    venue.state,
                    venue.address,
                    venue.phone,
                    venue.website,
                    venue.facebook_link,
                    venue.image_link,
                    genres,
                    venue.seeking_talent,
                    venue.seeking_description,
                ],
            )?;
            Ok(VenueId::new(tx.last_insert_rowid()))
        })?;

        venue.id = id;
        log::info!("Venue {} was successfully listed (id {})", venue.name, venue.id);
        Ok(venue)
    }

    /// Look up one venue. `Ok(None)` means the id does not exist.
    pub fn find_venue(&self, id: VenueId) -> Result<Option<Venue>> {
        load_venue(self.conn(), id)
    }

    /// All venues in store order.
    pub fn list_venues(&self) -> Result<Vec<Venue>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY id"))?;
        let venues = stmt
            .query_map([], row_to_venue)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(venues)
    }

    /// Apply an edit in place. The mandatory fields are checked before the
    /// transaction is opened.
    pub fn update_venue(&mut self, id: VenueId, edit: &VenueEdit) -> Result<Venue> {
        edit.check_required()?;

        self.write(ENTITY, |tx| {
            let mut venue = load_venue(tx, id)?.ok_or_else(|| Error::not_found(ENTITY, id))?;
            edit.apply_to(&mut venue)?;
            tx.execute(
                "UPDATE venues SET
                    name = ?2, city = ?3, state = ?4, address = ?5, phone = ?6,
                    website = ?7, facebook_link = ?8, image_link = ?9, genres = ?10,
                    seeking_talent = ?11, seeking_description = ?12
                 WHERE id = ?1",
                params![
                    venue.id,
                    venue.name,
                    venue.city,
                    venue.state,
                    venue.address,
                    venue.phone,
                    venue.website,
                    venue.facebook_link,
                    venue.image_link,
                    venue.genres.to_storage()?,
                    venue.seeking_talent,
                    venue.seeking_description,
                ],
            )?;
            Ok(venue)
        })
    }

    /// Delete a venue together with its shows. Returns how many shows went
    /// with it.
    pub fn delete_venue(&mut self, id: VenueId) -> Result<usize> {
        let removed_shows = self.write(ENTITY, |tx| {
            let shows: i64 = tx.query_row(
                "SELECT COUNT(*) FROM shows WHERE venue_id = ?1",
                [id],
                |row| row.get(0),
            )?;
            if tx.execute("DELETE FROM venues WHERE id = ?1", [id])? == 0 {
                return Err(Error::not_found(ENTITY, id));
            }
            Ok(usize::try_from(shows).unwrap_or_default())
        })?;

        log::info!("Deleted venue {id} and {removed_shows} show(s)");
        Ok(removed_shows)
    }
}

fn load_venue(conn: &Connection, id: VenueId) -> Result<Option<Venue>> {
    let venue = conn
        .query_row(
            &format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?1"),
            [id],
            row_to_venue,
        )
        .optional()?;
    Ok(venue)
}

fn row_to_venue(row: &Row<'_>) -> rusqlite::Result<Venue> {
    let genres: String = row.get(9)?;
    Ok(Venue {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        address: row.get(4)?,
        phone: row.get(5)?,
        website: row.get(6)?,
        facebook_link: row.get(7)?,
        image_link: row.get(8)?,
        genres: Genres::from_storage(&genres),
        seeking_talent: row.get(10)?,
        seeking_description: row.get(11)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewArtist, NewShow};
    use chrono::NaiveDate;

    fn musical_hop() -> NewVenue {
        NewVenue::new("The Musical Hop", "San Francisco", "CA", "1015 Folsom Street")
            .with_phone("123-123-1234")
            .with_genre("Jazz")
            .with_genre("Reggae")
            .seeking_talent("We are on the lookout for a local artist to play every two weeks.")
    }

    #[test]
    fn test_venue_round_trip() {
        let mut db = Database::open_in_memory().unwrap();
        let created = db.insert_venue(&musical_hop()).unwrap();
        let loaded = db.find_venue(created.id).unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.genres.iter().collect::<Vec<_>>(), vec!["Jazz", "Reggae"]);
    }

    #[test]
    fn test_find_missing_venue_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.find_venue(VenueId::new(404)).unwrap().is_none());
    }

    #[test]
    fn test_invalid_venue_is_not_persisted() {
        let mut db = Database::open_in_memory().unwrap();
        let err = db
            .insert_venue(&NewVenue::new("Nowhere", "", "CA", "1 Road"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(db.count_venues().unwrap(), 0);
    }

    #[test]
    fn test_update_missing_field_leaves_row_unchanged() {
        let mut db = Database::open_in_memory().unwrap();
        let created = db.insert_venue(&musical_hop()).unwrap();
        let edit = VenueEdit {
            name: Some("Renamed".to_string()),
            city: Some("Oakland".to_string()),
            ..VenueEdit::default()
        };
        let err = db.update_venue(created.id, &edit).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(db.find_venue(created.id).unwrap().unwrap(), created);
    }

    #[test]
    fn test_update_missing_venue_is_not_found() {
        let mut db = Database::open_in_memory().unwrap();
        let edit = VenueEdit {
            name: Some("Ghost".to_string()),
            genres: Some(Genres::new()),
            city: Some("Austin".to_string()),
            state: Some("TX".to_string()),
            address: Some("1 Main St".to_string()),
            phone: Some(String::new()),
            facebook_link: Some(String::new()),
            ..VenueEdit::default()
        };
        let err = db.update_venue(VenueId::new(9), &edit).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_venue_cascades_to_its_shows_only() {
        let mut db = Database::open_in_memory().unwrap();
        let hop = db.insert_venue(&musical_hop()).unwrap();
        let other = db
            .insert_venue(&NewVenue::new("Park Square", "San Francisco", "CA", "34 Whiskey Moore Ave"))
            .unwrap();
        let artist = db
            .insert_artist(&NewArtist::new("Guns N Petals", "San Francisco", "CA"))
            .unwrap();
        let start = NaiveDate::from_ymd_opt(2019, 5, 21)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap();
        db.insert_show(&NewShow::new(artist.id, hop.id, start)).unwrap();
        db.insert_show(&NewShow::new(artist.id, hop.id, start)).unwrap();
        db.insert_show(&NewShow::new(artist.id, other.id, start)).unwrap();

        assert_eq!(db.delete_venue(hop.id).unwrap(), 2);
        assert!(db.find_venue(hop.id).unwrap().is_none());
        assert_eq!(db.count_shows().unwrap(), 1);
        assert!(db.find_artist(artist.id).unwrap().is_some());
    }

    #[test]
    fn test_delete_missing_venue_changes_nothing() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_venue(&musical_hop()).unwrap();
        let err = db.delete_venue(VenueId::new(77)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(db.count_venues().unwrap(), 1);
    }
}
