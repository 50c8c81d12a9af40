//! Show repository
//!
//! Shows link one venue and one artist. Listings JOIN both sides so the
//! page gets display names in a single query.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::models::{ShowFields, ShowForm};
use super::{write_failed, DbError};

const RESOURCE: &str = "show";

/// Show record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Show {
    pub id: i32,
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime<Utc>,
}

impl From<&Show> for ShowForm {
    fn from(s: &Show) -> Self {
        Self {
            venue_id: s.venue_id.to_string(),
            artist_id: s.artist_id.to_string(),
            start_time: s.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Show with venue and artist display data
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

const LISTING_SELECT: &str = r#"
    SELECT
        s.id,
        v.id AS venue_id,
        v.name AS venue_name,
        a.id AS artist_id,
        a.name AS artist_name,
        a.image_link AS artist_image_link,
        s.start_time
    FROM shows s
    JOIN venues v ON v.id = s.venue_id
    JOIN artists a ON a.id = s.artist_id
"#;

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All shows with display data, earliest first.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let rows: Vec<ShowListing> =
            sqlx::query_as(&format!("{LISTING_SELECT} ORDER BY s.start_time, s.id"))
                .fetch_all(self.pool)
                .await?;

        Ok(rows)
    }

    /// Single show with display data.
    pub async fn get_listing(&self, id: i32) -> Result<ShowListing, DbError> {
        sqlx::query_as(&format!("{LISTING_SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Single show record.
    pub async fn get(&self, id: i32) -> Result<Show, DbError> {
        sqlx::query_as("SELECT id, venue_id, artist_id, start_time FROM shows WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert a show (one transaction).
    ///
    /// An unknown venue or artist trips the foreign key and is reported
    /// like any other failed write.
    pub async fn create(&self, fields: &ShowFields) -> Result<Show, DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(write_failed(RESOURCE, "create"))?;

        let show: Show = sqlx::query_as(
            r#"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id, venue_id, artist_id, start_time
            "#,
        )
        .bind(fields.venue_id)
        .bind(fields.artist_id)
        .bind(fields.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_failed(RESOURCE, "create"))?;

        tx.commit()
            .await
            .map_err(write_failed(RESOURCE, "create"))?;

        tracing::info!(
            show_id = show.id,
            venue_id = show.venue_id,
            artist_id = show.artist_id,
            start_time = %show.start_time,
            "show listed"
        );
        Ok(show)
    }

    /// Replace a show's fields (one transaction).
    pub async fn update(&self, id: i32, fields: &ShowFields) -> Result<Show, DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(write_failed(RESOURCE, "update"))?;

        let show: Option<Show> = sqlx::query_as(
            r#"
            UPDATE shows SET
                venue_id = $2,
                artist_id = $3,
                start_time = $4
            WHERE id = $1
            RETURNING id, venue_id, artist_id, start_time
            "#,
        )
        .bind(id)
        .bind(fields.venue_id)
        .bind(fields.artist_id)
        .bind(fields.start_time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(write_failed(RESOURCE, "update"))?;

        let show = show.ok_or_else(|| DbError::not_found(RESOURCE, id))?;

        tx.commit()
            .await
            .map_err(write_failed(RESOURCE, "update"))?;

        tracing::info!(show_id = id, "show updated");
        Ok(show)
    }

    /// Delete a show. Nothing references shows, so this never conflicts.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(write_failed(RESOURCE, "delete"))?;

        let deleted = sqlx::query("DELETE FROM shows WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(write_failed(RESOURCE, "delete"))?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }

        tx.commit()
            .await
            .map_err(write_failed(RESOURCE, "delete"))?;

        tracing::info!(show_id = id, "show deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn edit_form_prefill_round_trips_through_validation() {
        let show = Show {
            id: 1,
            venue_id: 1,
            artist_id: 4,
            start_time: Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap(),
        };

        let form = ShowForm::from(&show);
        assert_eq!(form.start_time, "2019-05-21 21:30:00");

        let fields = form.validate().unwrap();
        assert_eq!(fields.start_time, show.start_time);
        assert_eq!(fields.artist_id, 4);
    }
}
