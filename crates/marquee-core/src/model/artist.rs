use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::genres::Genres;
use crate::model::ids::ArtistId;
use crate::model::require_text;

pub(crate) const ENTITY: &str = "artist";

/// A performer who plays at shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub image_link: String,
    pub genres: Genres,
    pub seeking_venue: bool,

    /// Empty unless `seeking_venue` is set.
    pub seeking_description: String,
}

impl Artist {
    pub(crate) fn validate(&self) -> Result<()> {
        require_text(ENTITY, "name", &self.name)?;
        require_text(ENTITY, "city", &self.city)?;
        require_text(ENTITY, "state", &self.state)
    }

    pub(crate) fn normalize(&mut self) {
        if !self.seeking_venue {
            self.seeking_description.clear();
        }
    }
}

/// Field set for listing a new artist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
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
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: String,
}

impl NewArtist {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            state: state.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
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
    pub fn seeking_venue(mut self, description: impl Into<String>) -> Self {
        self.seeking_venue = true;
        self.seeking_description = description.into();
        self
    }

    pub(crate) fn into_record(self) -> Result<Artist> {
        let mut artist = Artist {
            id: ArtistId::new(0),
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            phone: self.phone,
            website: self.website,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            genres: self.genres,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        };
        artist.validate()?;
        artist.normalize();
        Ok(artist)
    }
}

/// A partial update to an artist. City, state, phone, genres and facebook
/// link are mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistEdit {
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Option<Genres>,
    pub facebook_link: Option<String>,
    pub name: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl ArtistEdit {
    pub fn check_required(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.city.is_none() {
            missing.push("city");
        }
        if self.state.is_none() {
            missing.push("state");
        }
        if self.phone.is_none() {
            missing.push("phone");
        }
        if self.genres.is_none() {
            missing.push("genres");
        }
        if self.facebook_link.is_none() {
            missing.push("facebook_link");
        }

        if missing.is_empty() {
            return Ok(());
        }
        Err(Error::validation(
            ENTITY,
            format!("missing required fields: {}", missing.join(", ")),
        ))
    }

    pub(crate) fn apply_to(&self, artist: &mut Artist) -> Result<()> {
        // Trimmed the same way as on create.
        let trimmed_fields = [
            (&mut artist.name, &self.name),
            (&mut artist.city, &self.city),
            (&mut artist.state, &self.state),
        ];
        for (field, value) in trimmed_fields {
            if let Some(value) = value {
                value.trim().clone_into(field);
            }
        }
        let text_fields = [
            (&mut artist.phone, &self.phone),
            (&mut artist.facebook_link, &self.facebook_link),
            (&mut artist.website, &self.website),
            (&mut artist.image_link, &self.image_link),
            (&mut artist.seeking_description, &self.seeking_description),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
        if let Some(genres) = &self.genres {
            artist.genres = genres.clone();
        }
        if let Some(seeking) = self.seeking_venue {
            artist.seeking_venue = seeking;
        }
        artist.validate()?;
        artist.normalize();
        Ok(())
    }
}
