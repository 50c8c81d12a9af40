//! Field-level validators shared by the venue, artist and show forms
//!
//! Limits mirror the column widths in the schema bootstrap.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::ValidationError;

/// Width of the short text columns (city, state, phone, links)
pub const MAX_SHORT_LEN: usize = 120;

/// Width of `image_link`
pub const MAX_IMAGE_LINK_LEN: usize = 500;

/// Upper bound for names (the column itself is unbounded TEXT)
pub const MAX_NAME_LEN: usize = 256;

/// North American phone format: 555-555-5555
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").expect("invalid phone regex"));

/// Required text: trimmed, non-empty, at most `max` characters.
pub fn required(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Optional text: blank becomes `None`.
pub fn optional(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    required(field, value, max).map(Some)
}

/// Optional phone number in `NNN-NNN-NNNN` form.
pub fn phone(value: &str) -> Result<Option<String>, ValidationError> {
    let Some(phone) = optional("phone", value, MAX_SHORT_LEN)? else {
        return Ok(None);
    };

    if !PHONE_RE.is_match(&phone) {
        return Err(ValidationError::InvalidFormat {
            field: "phone",
            reason: "must look like 555-555-5555",
        });
    }

    Ok(Some(phone))
}

/// Optional absolute http(s) link.
pub fn link(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(link) = optional(field, value, max)? else {
        return Ok(None);
    };

    match Url::parse(&link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(Some(link)),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be an absolute http(s) URL",
        }),
    }
}
