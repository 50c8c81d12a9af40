//! Artist repository
//!
//! Mirrors the venue repository; artists are listed flat by name rather
//! than grouped by area.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::models::{ArtistFields, ArtistForm, Scheduled, SearchTerm, ShowHistory};
use super::{delete_referenced, write_failed, DbError, Listing, Table};

const RESOURCE: &str = "artist";

const ARTIST_COLUMNS: &str =
    "id, name, city, state, phone, genres, image_link, facebook_link";

/// Artist record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    /// Comma-joined, as stored
    pub genres: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
}

impl From<&Artist> for ArtistForm {
    fn from(a: &Artist) -> Self {
        Self {
            name: a.name.clone(),
            city: a.city.clone().unwrap_or_default(),
            state: a.state.clone().unwrap_or_default(),
            phone: a.phone.clone().unwrap_or_default(),
            genres: a.genres.clone().unwrap_or_default(),
            image_link: a.image_link.clone().unwrap_or_default(),
            facebook_link: a.facebook_link.clone().unwrap_or_default(),
        }
    }
}

/// Artist row for the artist listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

/// A show by an artist, with its venue
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArtistShow {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all artists (id, name) ordered by name.
    pub async fn list(&self) -> Result<Vec<ArtistSummary>, DbError> {
        let rows: Vec<ArtistSummary> =
            sqlx::query_as("SELECT id, name FROM artists ORDER BY name, id")
                .fetch_all(self.pool)
                .await?;

        Ok(rows)
    }

    /// Case-insensitive substring search on name.
    pub async fn search(
        &self,
        term: &SearchTerm,
        now: DateTime<Utc>,
    ) -> Result<Vec<Listing>, DbError> {
        let rows: Vec<Listing> = sqlx::query_as(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.name ILIKE $1 ESCAPE '\'
            GROUP BY a.id, a.name
            ORDER BY a.name, a.id
            "#,
        )
        .bind(term.like_pattern())
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Most recently added artists, newest first.
    pub async fn recent(&self, limit: i64, now: DateTime<Utc>) -> Result<Vec<Listing>, DbError> {
        let rows: Vec<Listing> = sqlx::query_as(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            GROUP BY a.id, a.name
            ORDER BY a.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a single artist by id.
    pub async fn get(&self, id: i32) -> Result<Artist, DbError> {
        sqlx::query_as(&format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Shows by this artist with their venues, split around `now`.
    pub async fn show_history(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<ShowHistory<ArtistShow>, DbError> {
        let shows: Vec<ArtistShow> = sqlx::query_as(
            r#"
            SELECT
                s.id AS show_id,
                v.id AS venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(ShowHistory::partition(shows, now))
    }

    /// Insert an artist (one transaction).
    pub async fn create(&self, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(write_failed(RESOURCE, "create"))?;

        let artist: Artist = sqlx::query_as(&format!(
            r#"
            INSERT INTO artists (name, city, state, phone, genres, image_link, facebook_link)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ARTIST_COLUMNS}
            "#
        ))
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(fields.phone.as_deref())
        .bind(fields.genres.joined())
        .bind(fields.image_link.as_deref())
        .bind(fields.facebook_link.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(write_failed(RESOURCE, "create"))?;

        tx.commit()
            .await
            .map_err(write_failed(RESOURCE, "create"))?;

        tracing::info!(artist_id = artist.id, name = %artist.name, "artist listed");
        Ok(artist)
    }

    /// Replace an artist's fields (one transaction).
    pub async fn update(&self, id: i32, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(write_failed(RESOURCE, "update"))?;

        let artist: Option<Artist> = sqlx::query_as(&format!(
            r#"
            UPDATE artists SET
                name = $2,
                city = $3,
                state = $4,
                phone = $5,
                genres = $6,
                image_link = $7,
                facebook_link = $8
            WHERE id = $1
            RETURNING {ARTIST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(fields.phone.as_deref())
        .bind(fields.genres.joined())
        .bind(fields.image_link.as_deref())
        .bind(fields.facebook_link.as_deref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(write_failed(RESOURCE, "update"))?;

        let artist = artist.ok_or_else(|| DbError::not_found(RESOURCE, id))?;

        tx.commit()
            .await
            .map_err(write_failed(RESOURCE, "update"))?;

        tracing::info!(artist_id = id, "artist updated");
        Ok(artist)
    }

    /// Delete an artist. Refused with a conflict while shows reference it.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        delete_referenced(self.pool, Table::Artists, id).await?;
        tracing::info!(artist_id = id, "artist deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_form_prefill_keeps_joined_genres() {
        let artist = Artist {
            id: 5,
            name: "Matt Quevedo".into(),
            city: Some("New York".into()),
            state: Some("NY".into()),
            phone: Some("300-400-5000".into()),
            genres: Some("Jazz".into()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".into()),
        };

        let form = ArtistForm::from(&artist);
        assert_eq!(form.genres, "Jazz");

        let fields = form.validate().unwrap();
        assert_eq!(fields.genres.joined(), "Jazz");
    }
}
