//! Artist form validation and the comma-joined genre list

use serde::{Deserialize, Serialize};

use super::choices::{genre, us_state};
use super::fields::{self, MAX_IMAGE_LINK_LEN, MAX_NAME_LEN, MAX_SHORT_LEN};
use super::ValidationError;

/// Separator used when storing genres in a single column
const GENRE_SEPARATOR: char = ',';

/// Raw artist form as submitted (or pre-filled for editing).
///
/// `genres` holds the comma-joined list; repeated `genres` fields from a
/// multi-select are folded into it by [`ArtistForm::from_pairs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: String,
    pub image_link: String,
    pub facebook_link: String,
}

/// Validated artist fields, ready to insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Genres,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
}

impl ArtistForm {
    /// Build a form from raw urlencoded pairs, keeping every `genres` value.
    ///
    /// Unknown keys are ignored; for other repeated keys the last value wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        let mut genres: Vec<String> = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "name" => form.name = value,
                "city" => form.city = value,
                "state" => form.state = value,
                "phone" => form.phone = value,
                "genres" => genres.push(value),
                "image_link" => form.image_link = value,
                "facebook_link" => form.facebook_link = value,
                _ => {}
            }
        }

        form.genres = genres.join(",");
        form
    }

    /// Validate the submitted form.
    ///
    /// # Rules
    /// - name, city, state and at least one genre are required
    /// - state must be a US state code, genres must come from the genre list
    /// - phone and links follow the same rules as venues
    pub fn validate(&self) -> Result<ArtistFields, ValidationError> {
        Ok(ArtistFields {
            name: fields::required("name", &self.name, MAX_NAME_LEN)?,
            city: fields::required("city", &self.city, MAX_SHORT_LEN)?,
            state: us_state(&self.state)?,
            phone: fields::phone(&self.phone)?,
            genres: Genres::parse(&self.genres)?,
            image_link: fields::link("image_link", &self.image_link, MAX_IMAGE_LINK_LEN)?,
            facebook_link: fields::link("facebook_link", &self.facebook_link, MAX_SHORT_LEN)?,
        })
    }
}

/// Validated, de-duplicated genre list in canonical spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genres(Vec<&'static str>);

impl Genres {
    /// Parse a comma-joined genre list.
    ///
    /// # Example
    /// ```
    /// use fyyur_server::models::Genres;
    ///
    /// let genres = Genres::parse("jazz, Reggae,Jazz").unwrap();
    /// assert_eq!(genres.joined(), "Jazz,Reggae");
    /// assert!(Genres::parse(" , ").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let mut genres: Vec<&'static str> = Vec::new();

        for part in raw.split(GENRE_SEPARATOR).filter(|p| !p.trim().is_empty()) {
            let canonical = genre(part)?;
            if !genres.contains(&canonical) {
                genres.push(canonical);
            }
        }

        if genres.is_empty() {
            return Err(ValidationError::Empty { field: "genres" });
        }

        let genres = Self(genres);
        if genres.joined().chars().count() > MAX_SHORT_LEN {
            return Err(ValidationError::TooLong {
                field: "genres",
                max: MAX_SHORT_LEN,
            });
        }

        Ok(genres)
    }

    /// The stored, comma-joined form.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    pub fn as_slice(&self) -> &[&'static str] {
        &self.0
    }

    /// Split a stored genre column for display.
    ///
    /// Tolerates rows written before validation existed: entries are
    /// trimmed and blanks dropped, but unknown genres are kept.
    pub fn split_stored(stored: Option<&str>) -> Vec<String> {
        stored
            .unwrap_or_default()
            .split(GENRE_SEPARATOR)
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
