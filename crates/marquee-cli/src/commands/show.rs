use anyhow::{Context, Result};
use clap::Subcommand;

use marquee_core::model::{ArtistId, NewShow, VenueId};
use marquee_core::Database;

use super::print_json;

#[derive(Debug, Subcommand)]
pub enum ShowCommand {
    /// List every show in chronological order
    List,
    /// Book an artist at a venue
    Create {
        #[arg(long)]
        artist_id: ArtistId,
        #[arg(long)]
        venue_id: VenueId,
        /// Start time, e.g. "2030-05-21 21:30" or RFC 3339
        #[arg(long)]
        start_time: String,
    },
}

pub fn run(db: &mut Database, command: ShowCommand) -> Result<()> {
    match command {
        ShowCommand::List => print_json(&marquee_views::list_shows(db)?),
        ShowCommand::Create {
            artist_id,
            venue_id,
            start_time,
        } => {
            let new = NewShow::parse(artist_id, venue_id, &start_time)?;
            let show = db
                .insert_show(&new)
                .context("Show could not be listed")?;
            tracing::info!(
                "Show {} booked: artist {} at venue {}",
                show.id,
                show.artist_id,
                show.venue_id
            );
            print_json(&show)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::model::{NewArtist, NewVenue};

    fn create(artist: i64, venue: i64, start_time: &str) -> ShowCommand {
        ShowCommand::Create {
            artist_id: ArtistId::new(artist),
            venue_id: VenueId::new(venue),
            start_time: start_time.to_string(),
        }
    }

    #[test]
    fn test_create_show() {
        let mut db = Database::open_in_memory().unwrap();
        let venue = db
            .insert_venue(&NewVenue::new("The Musical Hop", "San Francisco", "CA", "1015 Folsom Street"))
            .unwrap();
        let artist = db
            .insert_artist(&NewArtist::new("Guns N Petals", "San Francisco", "CA"))
            .unwrap();

        run(&mut db, create(artist.id.get(), venue.id.get(), "2035-04-01 20:00")).unwrap();
        assert_eq!(db.count_shows().unwrap(), 1);

        assert!(run(&mut db, create(999, venue.id.get(), "2035-04-01 20:00")).is_err());
        assert!(run(&mut db, create(artist.id.get(), venue.id.get(), "soon")).is_err());
        assert_eq!(db.count_shows().unwrap(), 1);
    }
}
