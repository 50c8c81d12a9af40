//! Fixed choice lists offered by the venue and artist forms

use super::ValidationError;

/// US state and territory codes accepted for `state`.
pub const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Genres an artist may list.
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Validate a state code, returning its canonical upper-case form.
pub fn us_state(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "state" });
    }

    US_STATES
        .iter()
        .find(|code| code.eq_ignore_ascii_case(trimmed))
        .map(|code| (*code).to_owned())
        .ok_or_else(|| ValidationError::InvalidVariant {
            field: "state",
            value: trimmed.to_owned(),
        })
}

/// Look up a genre, returning its canonical spelling.
pub fn genre(value: &str) -> Result<&'static str, ValidationError> {
    let trimmed = value.trim();
    GENRES
        .iter()
        .copied()
        .find(|g| g.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| ValidationError::InvalidVariant {
            field: "genres",
            value: trimmed.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_is_case_insensitive() {
        assert_eq!(us_state("ca").unwrap(), "CA");
        assert_eq!(us_state(" NY ").unwrap(), "NY");
    }

    #[test]
    fn unknown_state_rejected() {
        let err = us_state("XX").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "state", .. }));
    }

    #[test]
    fn blank_state_is_empty() {
        assert_eq!(
            us_state("  ").unwrap_err(),
            ValidationError::Empty { field: "state" }
        );
    }

    #[test]
    fn genre_canonical_spelling() {
        assert_eq!(genre("rock n roll").unwrap(), "Rock n Roll");
        assert_eq!(genre("r&b").unwrap(), "R&B");
        assert!(genre("Polka").is_err());
    }
}
