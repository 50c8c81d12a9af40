//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - One transaction per write; any failure rolls it back
//! - Relies on DB constraints (foreign keys) instead of check-then-write

pub mod venues;
pub mod artists;
pub mod shows;

use serde::Serialize;
use sqlx::FromRow;

pub use venues::{Area, Venue, VenueRepo, VenueShow, VenueSummary};
pub use artists::{Artist, ArtistRepo, ArtistShow, ArtistSummary};
pub use shows::{Show, ShowListing, ShowRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A write was rolled back. The cause is logged, not carried.
    #[error("could not save {resource}")]
    WriteFailed { resource: &'static str },

    #[error("conflict: {resource} '{id}' {reason}")]
    Conflict {
        resource: &'static str,
        id: String,
        reason: &'static str,
    },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Name search hit or recent listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Listing {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Collapse a failed write into [`DbError::WriteFailed`], logging the cause.
///
/// The open transaction is dropped by the caller's `?`, which rolls it back.
pub(crate) fn write_failed(
    resource: &'static str,
    action: &'static str,
) -> impl FnOnce(sqlx::Error) -> DbError {
    move |err| {
        tracing::error!(resource, action, error = %err, "write rolled back");
        DbError::WriteFailed { resource }
    }
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// Delete a venue or artist by id.
///
/// Shows still referencing the row trip the RESTRICT foreign key, which is
/// reported as a conflict.
pub(crate) async fn delete_referenced(
    pool: &sqlx::PgPool,
    table: Table,
    id: i32,
) -> Result<(), DbError> {
    let resource = table.resource();
    let mut tx = pool
        .begin()
        .await
        .map_err(write_failed(resource, "delete"))?;

    let result = sqlx::query(table.delete_sql())
        .bind(id)
        .execute(&mut *tx)
        .await;

    let deleted = match result {
        Ok(done) => done.rows_affected(),
        Err(err) if is_foreign_key_violation(&err) => {
            tracing::info!(resource, id, "delete refused, shows still reference it");
            return Err(DbError::Conflict {
                resource,
                id: id.to_string(),
                reason: "still has scheduled shows",
            });
        }
        Err(err) => return Err(write_failed(resource, "delete")(err)),
    };

    if deleted == 0 {
        return Err(DbError::not_found(resource, id));
    }

    tx.commit()
        .await
        .map_err(write_failed(resource, "delete"))?;
    Ok(())
}

/// Tables that shows reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Venues,
    Artists,
}

impl Table {
    fn resource(self) -> &'static str {
        match self {
            Self::Venues => "venue",
            Self::Artists => "artist",
        }
    }

    fn delete_sql(self) -> &'static str {
        match self {
            Self::Venues => "DELETE FROM venues WHERE id = $1",
            Self::Artists => "DELETE FROM artists WHERE id = $1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_failure_hides_cause() {
        let err = write_failed("venue", "create")(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::WriteFailed { resource: "venue" }));
        assert_eq!(err.to_string(), "could not save venue");
    }

    #[test]
    fn row_not_found_is_not_fk_violation() {
        assert!(!is_foreign_key_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn table_resources() {
        assert_eq!(Table::Venues.resource(), "venue");
        assert_eq!(Table::Artists.delete_sql(), "DELETE FROM artists WHERE id = $1");
    }
}
