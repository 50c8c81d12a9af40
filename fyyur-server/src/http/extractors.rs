//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;

/// Extract a positive integer record id from the path.
///
/// Anything else is a 404, the same as a route that does not exist.
pub struct RecordId(pub i32);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound {
                resource: "page",
                id: parts.uri.path().to_owned(),
            })?;

        parse_record_id(&raw)
            .map(Self)
            .ok_or_else(|| ApiError::NotFound {
                resource: "page",
                id: parts.uri.path().to_owned(),
            })
    }
}

fn parse_record_id(raw: &str) -> Option<i32> {
    // Digits only: "+1" and " 1" are not ids
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_ids() {
        assert_eq!(parse_record_id("1"), Some(1));
        assert_eq!(parse_record_id("2147483647"), Some(i32::MAX));
    }

    #[test]
    fn rejects_non_ids() {
        assert_eq!(parse_record_id(""), None);
        assert_eq!(parse_record_id("0"), None);
        assert_eq!(parse_record_id("-3"), None);
        assert_eq!(parse_record_id("+3"), None);
        assert_eq!(parse_record_id("abc"), None);
        assert_eq!(parse_record_id("2147483648"), None);
    }
}
