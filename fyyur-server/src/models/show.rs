//! Show form validation and past/upcoming classification

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Accepted naive layouts for `start_time`, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Raw show form as submitted (or pre-filled for editing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub venue_id: String,
    pub artist_id: String,
    pub start_time: String,
}

/// Validated show fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowFields {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime<Utc>,
}

impl ShowForm {
    /// Validate the submitted form.
    ///
    /// Whether the venue and artist exist is left to the foreign keys.
    pub fn validate(&self) -> Result<ShowFields, ValidationError> {
        Ok(ShowFields {
            venue_id: record_id("venue_id", &self.venue_id)?,
            artist_id: record_id("artist_id", &self.artist_id)?,
            start_time: parse_start_time(&self.start_time)?,
        })
    }
}

fn record_id(field: &'static str, value: &str) -> Result<i32, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    match trimmed.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer id",
        }),
    }
}

/// Parse a submitted start time.
///
/// RFC 3339 keeps its offset; the naive layouts are taken as UTC.
pub fn parse_start_time(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "start_time" });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or(ValidationError::InvalidFormat {
            field: "start_time",
            reason: "expected YYYY-MM-DD HH:MM[:SS] or RFC 3339",
        })
}

/// Anything scheduled at a start time
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

/// Shows split around a reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowHistory<T> {
    /// Already started, most recent first
    pub past_shows: Vec<T>,
    /// Starting after the reference instant, soonest first
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T: Scheduled> ShowHistory<T> {
    /// Partition shows around `now`.
    ///
    /// A show is upcoming only if it starts strictly after `now`.
    pub fn partition(shows: Vec<T>, now: DateTime<Utc>) -> Self {
        let (mut upcoming, mut past): (Vec<T>, Vec<T>) =
            shows.into_iter().partition(|s| s.start_time() > now);

        upcoming.sort_by_key(|s| s.start_time());
        past.sort_by_key(|s| std::cmp::Reverse(s.start_time()));

        Self {
            past_shows_count: past.len(),
            upcoming_shows_count: upcoming.len(),
            past_shows: past,
            upcoming_shows: upcoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Slot(DateTime<Utc>);

    impl Scheduled for Slot {
        fn start_time(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 20, 0, 0).unwrap()
    }

    #[test]
    fn future_show_is_only_upcoming() {
        let later = Slot(now() + Duration::days(3));
        let history = ShowHistory::partition(vec![later.clone()], now());
        assert_eq!(history.upcoming_shows, vec![later]);
        assert!(history.past_shows.is_empty());
        assert_eq!(history.upcoming_shows_count, 1);
        assert_eq!(history.past_shows_count, 0);
    }

    #[test]
    fn show_starting_now_is_past() {
        let history = ShowHistory::partition(vec![Slot(now())], now());
        assert_eq!(history.past_shows_count, 1);
        assert_eq!(history.upcoming_shows_count, 0);
    }

    #[test]
    fn ordering_within_partitions() {
        let shows = vec![
            Slot(now() - Duration::days(10)),
            Slot(now() + Duration::days(5)),
            Slot(now() - Duration::days(1)),
            Slot(now() + Duration::days(1)),
        ];
        let history = ShowHistory::partition(shows, now());

        assert_eq!(
            history.past_shows,
            vec![Slot(now() - Duration::days(1)), Slot(now() - Duration::days(10))]
        );
        assert_eq!(
            history.upcoming_shows,
            vec![Slot(now() + Duration::days(1)), Slot(now() + Duration::days(5))]
        );
    }

    #[test]
    fn parses_naive_start_time_as_utc() {
        let parsed = parse_start_time("2035-04-01 20:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap());

        let parsed = parse_start_time("2035-04-01T20:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_start_time("2035-04-01T20:00:00-07:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2035, 4, 2, 3, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_start_time() {
        let err = parse_start_time("next tuesday").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "start_time", .. }));
    }

    #[test]
    fn show_form_ids_must_be_positive() {
        let form = ShowForm {
            venue_id: "0".into(),
            artist_id: "4".into(),
            start_time: "2019-05-21T21:30:00Z".into(),
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "venue_id", .. }
        ));
    }

    #[test]
    fn valid_show_form() {
        let form = ShowForm {
            venue_id: "1".into(),
            artist_id: " 4 ".into(),
            start_time: "2019-05-21T21:30:00.000Z".into(),
        };
        let fields = form.validate().unwrap();
        assert_eq!(fields.venue_id, 1);
        assert_eq!(fields.artist_id, 4);
    }
}
