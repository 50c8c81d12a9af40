//! Artist pages

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::db::repos::{Artist, ArtistRepo, ArtistShow, ArtistSummary, Listing};
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::models::{
    ArtistForm, Genres, SearchForm, SearchResults, SearchTerm, ShowHistory, GENRES, US_STATES,
};

/// Artist listing
#[derive(Serialize)]
pub struct ArtistsPage {
    pub artists: Vec<ArtistSummary>,
}

/// Artist as displayed, with genres split into a list
#[derive(Serialize)]
pub struct ArtistProfile {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
}

impl From<Artist> for ArtistProfile {
    fn from(a: Artist) -> Self {
        Self {
            genres: Genres::split_stored(a.genres.as_deref()),
            id: a.id,
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone,
            image_link: a.image_link,
            facebook_link: a.facebook_link,
        }
    }
}

/// Artist detail with show history
#[derive(Serialize)]
pub struct ArtistPage {
    #[serde(flatten)]
    pub artist: ArtistProfile,
    #[serde(flatten)]
    pub shows: ShowHistory<ArtistShow>,
}

/// Create/edit form data
#[derive(Serialize)]
pub struct ArtistFormPage {
    /// Set when editing an existing artist
    pub artist_id: Option<i32>,
    pub form: ArtistForm,
    pub states: &'static [&'static str],
    pub genres: &'static [&'static str],
}

/// GET /artists - all artists by name
async fn list_artists(State(state): State<Arc<AppState>>) -> Result<Json<ArtistsPage>, ApiError> {
    let artists = ArtistRepo::new(&state.pool).list().await?;
    Ok(Json(ArtistsPage { artists }))
}

/// POST /artists/search - case-insensitive name search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResults<Listing>>, ApiError> {
    let term = SearchTerm::from(form);
    let hits = ArtistRepo::new(&state.pool).search(&term, Utc::now()).await?;
    Ok(Json(SearchResults::new(&term, hits)))
}

/// GET /artists/{id} - artist with past and upcoming shows
async fn show_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ArtistPage>, ApiError> {
    let repo = ArtistRepo::new(&state.pool);
    let artist = repo.get(id).await?;
    let shows = repo.show_history(id, Utc::now()).await?;

    Ok(Json(ArtistPage {
        artist: ArtistProfile::from(artist),
        shows,
    }))
}

/// GET /artists/create - empty form
async fn create_artist_form() -> Json<ArtistFormPage> {
    Json(ArtistFormPage {
        artist_id: None,
        form: ArtistForm::default(),
        states: US_STATES,
        genres: GENRES,
    })
}

/// POST /artists/create - validate and insert
///
/// Takes raw pairs so a multi-select can submit `genres` more than once.
async fn create_artist_submission(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, ApiError> {
    let fields = ArtistForm::from_pairs(pairs).validate()?;
    ArtistRepo::new(&state.pool).create(&fields).await?;
    Ok(Redirect::to("/artists"))
}

/// GET /artists/{id}/edit - form pre-filled from the stored artist
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ArtistFormPage>, ApiError> {
    let artist = ArtistRepo::new(&state.pool).get(id).await?;

    Ok(Json(ArtistFormPage {
        artist_id: Some(id),
        form: ArtistForm::from(&artist),
        states: US_STATES,
        genres: GENRES,
    }))
}

/// POST /artists/{id}/edit - validate and update
async fn edit_artist_submission(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, ApiError> {
    let fields = ArtistForm::from_pairs(pairs).validate()?;
    ArtistRepo::new(&state.pool).update(id, &fields).await?;
    Ok(Redirect::to(&format!("/artists/{}", id)))
}

/// DELETE /artists/{id} - refused while shows reference the artist
async fn delete_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    ArtistRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/{id}", get(show_artist).delete(delete_artist))
        .route(
            "/artists/{id}/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
}
