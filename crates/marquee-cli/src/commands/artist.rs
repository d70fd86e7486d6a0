use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use serde_json::json;

use marquee_core::model::{ArtistEdit, ArtistId, NewArtist};
use marquee_core::Database;

use super::print_json;

#[derive(Debug, Subcommand)]
pub enum ArtistCommand {
    /// List every artist by id and name
    List,
    /// Search artists by name (case-insensitive substring)
    Search {
        /// Text to look for; an empty term lists every artist
        term: String,
    },
    /// Show an artist with their past and upcoming shows
    Show {
        /// Artist id
        id: ArtistId,
    },
    /// Add an artist
    Create(CreateArtist),
    /// Replace an artist's details
    ///
    /// City, state, phone, genres and facebook link must all be given.
    Edit {
        /// Artist id
        id: ArtistId,
        #[command(flatten)]
        fields: EditArtist,
    },
    /// Remove an artist and every show they are booked for
    Delete {
        /// Artist id
        id: ArtistId,
    },
}

#[derive(Debug, Args)]
pub struct CreateArtist {
    #[arg(long)]
    name: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    website: String,
    #[arg(long, default_value = "")]
    facebook_link: String,
    #[arg(long, default_value = "")]
    image_link: String,
    /// Genre tag; repeat for several
    #[arg(long = "genre")]
    genres: Vec<String>,
    /// The artist is looking for venues
    #[arg(long)]
    seeking_venue: bool,
    #[arg(long, default_value = "")]
    seeking_description: String,
}

impl From<CreateArtist> for NewArtist {
    fn from(args: CreateArtist) -> Self {
        Self {
            name: args.name,
            city: args.city,
            state: args.state,
            phone: args.phone,
            website: args.website,
            facebook_link: args.facebook_link,
            image_link: args.image_link,
            genres: args.genres.iter().collect(),
            seeking_venue: args.seeking_venue,
            seeking_description: args.seeking_description,
        }
    }
}

#[derive(Debug, Args)]
pub struct EditArtist {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    facebook_link: Option<String>,
    #[arg(long)]
    image_link: Option<String>,
    /// Genre tag; repeat for several
    #[arg(long = "genre")]
    genres: Option<Vec<String>>,
    #[arg(long)]
    seeking_venue: Option<bool>,
    #[arg(long)]
    seeking_description: Option<String>,
}

impl From<EditArtist> for ArtistEdit {
    fn from(args: EditArtist) -> Self {
        Self {
            city: args.city,
            state: args.state,
            phone: args.phone,
            genres: args.genres.map(|tags| tags.iter().collect()),
            facebook_link: args.facebook_link,
            name: args.name,
            website: args.website,
            image_link: args.image_link,
            seeking_venue: args.seeking_venue,
            seeking_description: args.seeking_description,
        }
    }
}

pub fn run(db: &mut Database, command: ArtistCommand, now: NaiveDateTime) -> Result<()> {
    match command {
        ArtistCommand::List => print_json(&marquee_views::list_artists(db)?),
        ArtistCommand::Search { term } => print_json(&marquee_views::search_artists(db, &term)?),
        ArtistCommand::Show { id } => print_json(&marquee_views::artist_detail(db, id, now)?),
        ArtistCommand::Create(args) => {
            let artist = db
                .insert_artist(&args.into())
                .context("Artist could not be listed")?;
            tracing::info!("Artist {} ({}) listed", artist.id, artist.name);
            print_json(&artist)
        }
        ArtistCommand::Edit { id, fields } => {
            let artist = db
                .update_artist(id, &fields.into())
                .with_context(|| format!("Artist {} could not be updated", id))?;
            print_json(&artist)
        }
        ArtistCommand::Delete { id } => {
            let removed_shows = db
                .delete_artist(id)
                .with_context(|| format!("Artist {} could not be deleted", id))?;
            tracing::info!("Artist {} deleted with {} shows", id, removed_shows);
            print_json(&json!({ "success": true, "artist_id": id }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: ArtistCommand,
    }

    fn parse(args: &[&str]) -> ArtistCommand {
        TestCli::try_parse_from(std::iter::once("artist").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_create_requires_location() {
        let result = TestCli::try_parse_from(["artist", "create", "--name", "Guns N Petals"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_full_edit_is_applied() {
        let mut db = Database::open_in_memory().unwrap();
        let now = chrono::Utc::now().naive_utc();
        run(
            &mut db,
            parse(&["create", "--name", "Matt Quevedo", "--city", "New York", "--state", "NY"]),
            now,
        )
        .unwrap();

        let edit = parse(&[
            "edit", "1", "--city", "Brooklyn", "--state", "NY", "--phone", "300-400-5000",
            "--genre", "Jazz", "--facebook-link", "https://www.facebook.com/mattquevedo",
        ]);
        run(&mut db, edit, now).unwrap();

        let artist = db.find_artist(ArtistId::new(1)).unwrap().unwrap();
        assert_eq!(artist.city, "Brooklyn");
        assert_eq!(artist.name, "Matt Quevedo");
        assert!(artist.genres.contains("Jazz"));
    }

    #[test]
    fn test_partial_edit_is_rejected() {
        let mut db = Database::open_in_memory().unwrap();
        let now = chrono::Utc::now().naive_utc();
        run(
            &mut db,
            parse(&["create", "--name", "Matt Quevedo", "--city", "New York", "--state", "NY"]),
            now,
        )
        .unwrap();

        let result = run(&mut db, parse(&["edit", "1", "--city", "Brooklyn"]), now);
        assert!(result.is_err());
        let artist = db.find_artist(ArtistId::new(1)).unwrap().unwrap();
        assert_eq!(artist.city, "New York");
    }
}
