//! Venue form validation

use serde::{Deserialize, Serialize};

use super::choices::us_state;
use super::fields::{self, MAX_IMAGE_LINK_LEN, MAX_NAME_LEN, MAX_SHORT_LEN};
use super::ValidationError;

/// Raw venue form as submitted (or pre-filled for editing).
///
/// Every field defaults to empty so a missing field surfaces as a
/// validation error rather than a form rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
}

/// Validated venue fields, ready to insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
}

impl VenueForm {
    /// Validate the submitted form.
    ///
    /// # Rules
    /// - name, city, state and address are required
    /// - state must be a US state code
    /// - phone, when given, must look like 555-555-5555
    /// - links, when given, must be absolute http(s) URLs
    pub fn validate(&self) -> Result<VenueFields, ValidationError> {
        Ok(VenueFields {
            name: fields::required("name", &self.name, MAX_NAME_LEN)?,
            city: fields::required("city", &self.city, MAX_SHORT_LEN)?,
            state: us_state(&self.state)?,
            address: fields::required("address", &self.address, MAX_SHORT_LEN)?,
            phone: fields::phone(&self.phone)?,
            image_link: fields::link("image_link", &self.image_link, MAX_IMAGE_LINK_LEN)?,
            facebook_link: fields::link("facebook_link", &self.facebook_link, MAX_SHORT_LEN)?,
        })
    }
}
