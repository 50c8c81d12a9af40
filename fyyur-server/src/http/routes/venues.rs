//! Venue pages
//!
//! GET pages return view data; form posts redirect on success.

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

use crate::db::repos::{Area, Listing, Venue, VenueRepo, VenueShow};
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::models::{SearchForm, SearchResults, SearchTerm, ShowHistory, VenueForm, US_STATES};

/// Venue listing grouped by area
#[derive(Serialize)]
pub struct VenuesPage {
    pub areas: Vec<Area>,
}

/// Venue detail with show history
#[derive(Serialize)]
pub struct VenuePage {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: ShowHistory<VenueShow>,
}

/// Create/edit form data
#[derive(Serialize)]
pub struct VenueFormPage {
    /// Set when editing an existing venue
    pub venue_id: Option<i32>,
    pub form: VenueForm,
    pub states: &'static [&'static str],
}

/// GET /venues - venues grouped by (state, city)
async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Json<VenuesPage>, ApiError> {
    let areas = VenueRepo::new(&state.pool).list_by_area(Utc::now()).await?;
    Ok(Json(VenuesPage { areas }))
}

/// POST /venues/search - case-insensitive name search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResults<Listing>>, ApiError> {
    let term = SearchTerm::from(form);
    let hits = VenueRepo::new(&state.pool).search(&term, Utc::now()).await?;
    Ok(Json(SearchResults::new(&term, hits)))
}

/// GET /venues/{id} - venue with past and upcoming shows
async fn show_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<VenuePage>, ApiError> {
    let repo = VenueRepo::new(&state.pool);
    let venue = repo.get(id).await?;
    let shows = repo.show_history(id, Utc::now()).await?;

    Ok(Json(VenuePage { venue, shows }))
}

/// GET /venues/create - empty form
async fn create_venue_form() -> Json<VenueFormPage> {
    Json(VenueFormPage {
        venue_id: None,
        form: VenueForm::default(),
        states: US_STATES,
    })
}

/// POST /venues/create - validate and insert
async fn create_venue_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> Result<Redirect, ApiError> {
    let fields = form.validate()?;
    VenueRepo::new(&state.pool).create(&fields).await?;
    Ok(Redirect::to("/venues"))
}

/// GET /venues/{id}/edit - form pre-filled from the stored venue
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<VenueFormPage>, ApiError> {
    let venue = VenueRepo::new(&state.pool).get(id).await?;

    Ok(Json(VenueFormPage {
        venue_id: Some(id),
        form: VenueForm::from(&venue),
        states: US_STATES,
    }))
}

/// POST /venues/{id}/edit - validate and update
async fn edit_venue_submission(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Form(form): Form<VenueForm>,
) -> Result<Redirect, ApiError> {
    let fields = form.validate()?;
    VenueRepo::new(&state.pool).update(id, &fields).await?;
    Ok(Redirect::to(&format!("/venues/{}", id)))
}

/// DELETE /venues/{id} - refused while shows reference the venue
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    VenueRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route(
            "/venues/{id}/edit",
            get(edit_venue_form).post(edit_venue_submission),
        )
}
