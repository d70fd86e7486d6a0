use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use serde_json::json;

use marquee_core::model::{NewVenue, VenueEdit, VenueId};
use marquee_core::Database;

use super::print_json;

#[derive(Debug, Subcommand)]
pub enum VenueCommand {
    /// List every venue grouped by city and state
    ///
    /// Each venue carries the number of shows it has coming up.
    List,
    /// Search venues by name (case-insensitive substring)
    Search {
        /// Text to look for; an empty term lists every venue
        term: String,
    },
    /// Show a venue with its past and upcoming shows
    Show {
        /// Venue id
        id: VenueId,
    },
    /// Add a venue
    Create(CreateVenue),
    /// Replace a venue's details
    ///
    /// Name, genres, city, state, address, phone and facebook link must all
    /// be given; any other field left out keeps its stored value.
    Edit {
        /// Venue id
        id: VenueId,
        #[command(flatten)]
        fields: EditVenue,
    },
    /// Remove a venue and every show booked at it
    Delete {
        /// Venue id
        id: VenueId,
    },
}

#[derive(Debug, Args)]
pub struct CreateVenue {
    #[arg(long)]
    name: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    address: String,
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
    /// The venue is looking for talent
    #[arg(long)]
    seeking_talent: bool,
    /// What kind of talent, when seeking
    #[arg(long, default_value = "")]
    seeking_description: String,
}

impl From<CreateVenue> for NewVenue {
    fn from(args: CreateVenue) -> Self {
        Self {
            name: args.name,
            city: args.city,
            state: args.state,
            address: args.address,
            phone: args.phone,
            website: args.website,
            facebook_link: args.facebook_link,
            image_link: args.image_link,
            genres: args.genres.iter().collect(),
            seeking_talent: args.seeking_talent,
            seeking_description: args.seeking_description,
        }
    }
}

#[derive(Debug, Args)]
pub struct EditVenue {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    address: Option<String>,
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
    seeking_talent: Option<bool>,
    #[arg(long)]
    seeking_description: Option<String>,
}

impl From<EditVenue> for VenueEdit {
    fn from(args: EditVenue) -> Self {
        Self {
            name: args.name,
            genres: args.genres.map(|tags| tags.iter().collect()),
            city: args.city,
            state: args.state,
            address: args.address,
            phone: args.phone,
            facebook_link: args.facebook_link,
            website: args.website,
            image_link: args.image_link,
            seeking_talent: args.seeking_talent,
            seeking_description: args.seeking_description,
        }
    }
}

pub fn run(db: &mut Database, command: VenueCommand, now: NaiveDateTime) -> Result<()> {
    match command {
        VenueCommand::List => print_json(&marquee_views::venue_areas(db, now)?),
        VenueCommand::Search { term } => print_json(&marquee_views::search_venues(db, &term)?),
        VenueCommand::Show { id } => print_json(&marquee_views::venue_detail(db, id, now)?),
        VenueCommand::Create(args) => {
            let venue = db
                .insert_venue(&args.into())
                .context("Venue could not be listed")?;
            tracing::info!("Venue {} ({}) listed", venue.id, venue.name);
            print_json(&venue)
        }
        VenueCommand::Edit { id, fields } => {
            let venue = db
                .update_venue(id, &fields.into())
                .with_context(|| format!("Venue {} could not be updated", id))?;
            print_json(&venue)
        }
        VenueCommand::Delete { id } => {
            let removed_shows = db
                .delete_venue(id)
                .with_context(|| format!("Venue {} could not be deleted", id))?;
            tracing::info!("Venue {} deleted with {} shows", id, removed_shows);
            print_json(&json!({ "success": true, "venue_id": id }))
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
        command: VenueCommand,
    }

    fn parse(args: &[&str]) -> VenueCommand {
        TestCli::try_parse_from(std::iter::once("venue").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_create_args_into_new_venue() {
        let command = parse(&[
            "create", "--name", "The Musical Hop", "--city", "San Francisco", "--state", "CA",
            "--address", "1015 Folsom Street", "--genre", "Jazz", "--genre", "Reggae",
            "--seeking-talent", "--seeking-description", "Local artists",
        ]);
        let VenueCommand::Create(args) = command else {
            panic!("expected create");
        };
        let new = NewVenue::from(args);
        assert_eq!(new.name, "The Musical Hop");
        assert_eq!(new.genres.len(), 2);
        assert!(new.seeking_talent);
        assert_eq!(new.seeking_description, "Local artists");
    }

    #[test]
    fn test_edit_args_leave_absent_fields_unset() {
        let command = parse(&["edit", "4", "--name", "Renamed", "--seeking-talent", "false"]);
        let VenueCommand::Edit { id, fields } = command else {
            panic!("expected edit");
        };
        assert_eq!(id, VenueId::new(4));
        let edit = VenueEdit::from(fields);
        assert_eq!(edit.name.as_deref(), Some("Renamed"));
        assert_eq!(edit.seeking_talent, Some(false));
        assert!(edit.genres.is_none());
        assert!(edit.check_required().is_err());
    }

    #[test]
    fn test_create_then_delete() {
        let mut db = Database::open_in_memory().unwrap();
        let now = chrono::Utc::now().naive_utc();
        let create = parse(&[
            "create", "--name", "Park Square", "--city", "San Francisco", "--state", "CA",
            "--address", "34 Whiskey Moore Ave",
        ]);
        run(&mut db, create, now).unwrap();
        assert_eq!(db.count_venues().unwrap(), 1);

        run(&mut db, parse(&["delete", "1"]), now).unwrap();
        assert_eq!(db.count_venues().unwrap(), 0);
        assert!(run(&mut db, parse(&["delete", "1"]), now).is_err());
    }
}
