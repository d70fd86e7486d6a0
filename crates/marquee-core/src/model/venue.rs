use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::genres::Genres;
use crate::model::ids::VenueId;
use crate::model::require_text;

pub(crate) const ENTITY: &str = "venue";

/// A place that hosts shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub image_link: String,
    pub genres: Genres,
    pub seeking_talent: bool,

    /// Empty unless `seeking_talent` is set.
    pub seeking_description: String,
}

impl Venue {
    pub(crate) fn validate(&self) -> Result<()> {
        require_text(ENTITY, "name", &self.name)?;
        require_text(ENTITY, "city", &self.city)?;
        require_text(ENTITY, "state", &self.state)?;
        require_text(ENTITY, "address", &self.address)
    }

    pub(crate) fn normalize(&mut self) {
        if !self.seeking_talent {
            self.seeking_description.clear();
        }
    }
}

/// Field set for listing a new venue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub genres: Genres,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: String,
}

impl NewVenue {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            state: state.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    #[must_use]
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    #[must_use]
    pub fn with_facebook_link(mut self, link: impl Into<String>) -> Self {
        self.facebook_link = link.into();
        self
    }

    #[must_use]
    pub fn with_image_link(mut self, link: impl Into<String>) -> Self {
        self.image_link = link.into();
        self
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl AsRef<str>) -> Self {
        self.genres.insert(genre);
        self
    }

    #[must_use]
    pub fn seeking_talent(mut self, description: impl Into<String>) -> Self {
        self.seeking_talent = true;
        self.seeking_description = description.into();
        self
    }

    /// Build the record that will be written, with a placeholder id.
    pub(crate) fn into_record(self) -> Result<Venue> {
        let mut venue = Venue {
            id: VenueId::new(0),
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone,
            website: self.website,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            genres: self.genres,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        };
        venue.validate()?;
        venue.normalize();
        Ok(venue)
    }
}

/// A partial update to a venue. `None` leaves the stored value untouched.
///
/// An edit must carry name, genres, city, state, address, phone and
/// facebook link; the remaining fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueEdit {
    pub name: Option<String>,
    pub genres: Option<Genres>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

impl VenueEdit {
    /// Reject the edit unless every mandatory field is present.
    pub fn check_required(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("name", self.name.is_none()),
            ("genres", self.genres.is_none()),
            ("city", self.city.is_none()),
            ("state", self.state.is_none()),
            ("address", self.address.is_none()),
            ("phone", self.phone.is_none()),
            ("facebook_link", self.facebook_link.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(
                ENTITY,
                format!("missing required fields: {}", missing.join(", ")),
            ))
        }
    }

    pub(crate) fn apply_to(&self, venue: &mut Venue) -> Result<()> {
        assign_trimmed(&mut venue.name, self.name.as_ref());
        assign_trimmed(&mut venue.city, self.city.as_ref());
        assign_trimmed(&mut venue.state, self.state.as_ref());
        assign_trimmed(&mut venue.address, self.address.as_ref());
        assign(&mut venue.phone, self.phone.as_ref());
        assign(&mut venue.facebook_link, self.facebook_link.as_ref());
        assign(&mut venue.website, self.website.as_ref());
        assign(&mut venue.image_link, self.image_link.as_ref());
        assign(
            &mut venue.seeking_description,
            self.seeking_description.as_ref(),
        );
        if let Some(genres) = &self.genres {
            venue.genres = genres.clone();
        }
        if let Some(seeking) = self.seeking_talent {
            venue.seeking_talent = seeking;
        }
        venue.validate()?;
        venue.normalize();
        Ok(())
    }
}

fn assign(field: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        field.clone_from(value);
    }
}

fn assign_trimmed(field: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        value.trim().clone_into(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_edit() -> VenueEdit {
        VenueEdit {
            name: Some("The Dueling Pianos Bar".to_string()),
            genres: Some(["Classical", "R&B"].into_iter().collect()),
            city: Some("New York".to_string()),
            state: Some("NY".to_string()),
            address: Some("335 Delancey Street".to_string()),
            phone: Some("914-003-1132".to_string()),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".to_string()),
            ..VenueEdit::default()
        }
    }

    #[test]
    fn test_new_venue_requires_name() {
        let err = NewVenue::new("  ", "Austin", "TX", "1 Main St")
            .into_record()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_new_venue_clears_description_when_not_seeking() {
        let mut new = NewVenue::new("Park Square", "San Francisco", "CA", "34 Whiskey Moore Ave");
        new.seeking_description = "ignored".to_string();
        let venue = new.into_record().unwrap();
        assert!(!venue.seeking_talent);
        assert!(venue.seeking_description.is_empty());
    }

    #[test]
    fn test_new_venue_keeps_description_when_seeking() {
        let venue = NewVenue::new("The Musical Hop", "San Francisco", "CA", "1015 Folsom Street")
            .seeking_talent("Looking for local jazz acts")
            .into_record()
            .unwrap();
        assert!(venue.seeking_talent);
        assert_eq!(venue.seeking_description, "Looking for local jazz acts");
    }

    #[test]
    fn test_edit_reports_every_missing_field() {
        let edit = VenueEdit {
            name: Some("X".to_string()),
            ..VenueEdit::default()
        };
        let err = edit.check_required().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("genres"));
        assert!(message.contains("facebook_link"));
        assert!(!message.contains("name,"));
    }

    #[test]
    fn test_edit_leaves_omitted_fields() {
        let mut venue = NewVenue::new("Old", "Austin", "TX", "1 Main St")
            .with_website("https://old.example")
            .into_record()
            .unwrap();
        let edit = full_edit();
        edit.check_required().unwrap();
        edit.apply_to(&mut venue).unwrap();
        assert_eq!(venue.name, "The Dueling Pianos Bar");
        assert_eq!(venue.website, "https://old.example");
        assert_eq!(venue.genres.len(), 2);
    }

    #[test]
    fn test_edit_turning_off_seeking_clears_description() {
        let mut venue = NewVenue::new("Hop", "Austin", "TX", "1 Main St")
            .seeking_talent("bands wanted")
            .into_record()
            .unwrap();
        let edit = VenueEdit {
            seeking_talent: Some(false),
            ..full_edit()
        };
        edit.apply_to(&mut venue).unwrap();
        assert!(venue.seeking_description.is_empty());
    }
    #[test]
    fn test_edit_trims_name_and_location() {
        let mut venue = NewVenue::new("Hop", "Austin", "TX", "1 Main St")
            .into_record()
            .unwrap();
        let edit = VenueEdit {
            name: Some(" The Hop ".to_string()),
            city: Some(" Dallas ".to_string()),
            state: Some("TX\t".to_string()),
            address: Some("  2 Elm St".to_string()),
            ..full_edit()
        };
        edit.apply_to(&mut venue).unwrap();
        assert_eq!(venue.name, "The Hop");
        assert_eq!(venue.city, "Dallas");
        assert_eq!(venue.state, "TX");
        assert_eq!(venue.address, "2 Elm St");
    }
}
