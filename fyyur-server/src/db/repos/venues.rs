//! Venue repository
//!
//! - list_by_area: one ordered query, grouped into (state, city) areas in Rust
//! - search: ILIKE on name, wildcards escaped
//! - show_history: shows JOIN artists, split into past/upcoming

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::models::{Scheduled, SearchTerm, ShowHistory, VenueFields, VenueForm};
use super::{delete_referenced, write_failed, DbError, Listing, Table};

const RESOURCE: &str = "venue";

const VENUE_COLUMNS: &str =
    "id, name, city, state, address, phone, image_link, facebook_link";

/// Venue record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
}

impl From<&Venue> for VenueForm {
    fn from(v: &Venue) -> Self {
        Self {
            name: v.name.clone(),
            city: v.city.clone(),
            state: v.state.clone().unwrap_or_default(),
            address: v.address.clone().unwrap_or_default(),
            phone: v.phone.clone().unwrap_or_default(),
            image_link: v.image_link.clone().unwrap_or_default(),
            facebook_link: v.facebook_link.clone().unwrap_or_default(),
        }
    }
}

/// Venue row for the area listing
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    #[serde(skip)]
    pub city: String,
    #[serde(skip)]
    pub state: Option<String>,
    pub num_upcoming_shows: i64,
}

/// Venues sharing a (state, city) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: Option<String>,
    pub venues: Vec<VenueSummary>,
}

/// A show at a venue, with the performing artist
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VenueShow {
    pub show_id: i32,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List venues grouped by (state, city).
    ///
    /// Single query ordered by area; consecutive rows are folded into areas.
    pub async fn list_by_area(&self, now: DateTime<Utc>) -> Result<Vec<Area>, DbError> {
        let rows: Vec<VenueSummary> = sqlx::query_as(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id, v.name, v.city, v.state
            ORDER BY v.state, v.city, v.name, v.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(group_into_areas(rows))
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
                v.id,
                v.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE v.name ILIKE $1 ESCAPE '\'
            GROUP BY v.id, v.name
            ORDER BY v.name, v.id
            "#,
        )
        .bind(term.like_pattern())
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Most recently added venues, newest first.
    pub async fn recent(&self, limit: i64, now: DateTime<Utc>) -> Result<Vec<Listing>, DbError> {
        let rows: Vec<Listing> = sqlx::query_as(
            r#"
            SELECT
                v.id,
                v.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id, v.name
            ORDER BY v.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a single venue by id.
    pub async fn get(&self, id: i32) -> Result<Venue, DbError> {
        sqlx::query_as(&format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Shows at this venue with their artists, split around `now`.
    pub async fn show_history(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<ShowHistory<VenueShow>, DbError> {
        let shows: Vec<VenueShow> = sqlx::query_as(
            r#"
            SELECT
                s.id AS show_id,
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(ShowHistory::partition(shows, now))
    }

    /// Insert a venue (one transaction).
    pub async fn create(&self, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(write_failed(RESOURCE, "create"))?;

        let venue: Venue = sqlx::query_as(&format!(
            r#"
            INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.address)
        .bind(fields.phone.as_deref())
        .bind(fields.image_link.as_deref())
        .bind(fields.facebook_link.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(write_failed(RESOURCE, "create"))?;

        tx.commit()
            .await
            .map_err(write_failed(RESOURCE, "create"))?;

        tracing::info!(venue_id = venue.id, name = %venue.name, "venue listed");
        Ok(venue)
    }

    /// Replace a venue's fields (one transaction).
    pub async fn update(&self, id: i32, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(write_failed(RESOURCE, "update"))?;

        let venue: Option<Venue> = sqlx::query_as(&format!(
            r#"
            UPDATE venues SET
                name = $2,
                city = $3,
                state = $4,
                address = $5,
                phone = $6,
                image_link = $7,
                facebook_link = $8
            WHERE id = $1
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.address)
        .bind(fields.phone.as_deref())
        .bind(fields.image_link.as_deref())
        .bind(fields.facebook_link.as_deref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(write_failed(RESOURCE, "update"))?;

        let venue = venue.ok_or_else(|| DbError::not_found(RESOURCE, id))?;

        tx.commit()
            .await
            .map_err(write_failed(RESOURCE, "update"))?;

        tracing::info!(venue_id = id, "venue updated");
        Ok(venue)
    }

    /// Delete a venue. Refused with a conflict while shows reference it.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        delete_referenced(self.pool, Table::Venues, id).await?;
        tracing::info!(venue_id = id, "venue deleted");
        Ok(())
    }
}

/// Fold rows ordered by (state, city) into areas.
fn group_into_areas(rows: Vec<VenueSummary>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();

    for row in rows {
        match areas.last_mut() {
            Some(area) if area.state == row.state && area.city == row.city => {
                area.venues.push(row);
            }
            _ => areas.push(Area {
                city: row.city.clone(),
                state: row.state.clone(),
                venues: vec![row],
            }),
        }
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i32, name: &str, city: &str, state: &str) -> VenueSummary {
        VenueSummary {
            id,
            name: name.into(),
            city: city.into(),
            state: Some(state.into()),
            num_upcoming_shows: 0,
        }
    }

    #[test]
    fn groups_consecutive_rows_by_area() {
        let rows = vec![
            summary(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
            summary(1, "The Musical Hop", "San Francisco", "CA"),
            summary(2, "The Dueling Pianos Bar", "New York", "NY"),
        ];

        let areas = group_into_areas(rows);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].state.as_deref(), Some("CA"));
        assert_eq!(
            areas[0].venues.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![3, 1]
        );
        assert_eq!(areas[1].venues.len(), 1);
    }

    #[test]
    fn same_city_different_state_is_separate_area() {
        let rows = vec![
            summary(1, "Hall A", "Portland", "ME"),
            summary(2, "Hall B", "Portland", "OR"),
        ];

        let areas = group_into_areas(rows);
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn no_venues_no_areas() {
        assert!(group_into_areas(Vec::new()).is_empty());
    }

    #[test]
    fn edit_form_prefill() {
        let venue = Venue {
            id: 1,
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: Some("CA".into()),
            address: Some("1015 Folsom Street".into()),
            phone: None,
            image_link: None,
            facebook_link: None,
        };
        let form = VenueForm::from(&venue);
        assert_eq!(form.address, "1015 Folsom Street");
        assert_eq!(form.phone, "");
        assert!(form.validate().is_ok());
    }
}
