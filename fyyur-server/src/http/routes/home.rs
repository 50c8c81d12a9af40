//! Home page

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::db::repos::{ArtistRepo, Listing, VenueRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// How many recent listings the home page shows
const RECENT_LIMIT: i64 = 10;

/// Home page data
#[derive(Serialize)]
pub struct HomePage {
    pub recent_venues: Vec<Listing>,
    pub recent_artists: Vec<Listing>,
}

/// GET / - recently listed venues and artists
async fn home(State(state): State<Arc<AppState>>) -> Result<Json<HomePage>, ApiError> {
    let now = Utc::now();
    let recent_venues = VenueRepo::new(&state.pool).recent(RECENT_LIMIT, now).await?;
    let recent_artists = ArtistRepo::new(&state.pool).recent(RECENT_LIMIT, now).await?;

    Ok(Json(HomePage {
        recent_venues,
        recent_artists,
    }))
}

/// Home routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(home))
}
