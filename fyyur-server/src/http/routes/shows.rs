//! Show pages

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;

use crate::db::repos::{ShowListing, ShowRepo};
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::models::ShowForm;

/// Show listing
#[derive(Serialize)]
pub struct ShowsPage {
    pub shows: Vec<ShowListing>,
}

/// Create/edit form data
#[derive(Serialize)]
pub struct ShowFormPage {
    /// Set when editing an existing show
    pub show_id: Option<i32>,
    pub form: ShowForm,
}

/// GET /shows - all shows, earliest first
async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Json<ShowsPage>, ApiError> {
    let shows = ShowRepo::new(&state.pool).list().await?;
    Ok(Json(ShowsPage { shows }))
}

/// GET /shows/{id} - one show with venue and artist names
async fn show_show(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ShowListing>, ApiError> {
    let show = ShowRepo::new(&state.pool).get_listing(id).await?;
    Ok(Json(show))
}

/// GET /shows/create - empty form
async fn create_show_form() -> Json<ShowFormPage> {
    Json(ShowFormPage {
        show_id: None,
        form: ShowForm::default(),
    })
}

/// POST /shows/create - validate and insert
async fn create_show_submission(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> Result<Redirect, ApiError> {
    let fields = form.validate()?;
    ShowRepo::new(&state.pool).create(&fields).await?;
    Ok(Redirect::to("/shows"))
}

/// GET /shows/{id}/edit - form pre-filled from the stored show
async fn edit_show_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ShowFormPage>, ApiError> {
    let show = ShowRepo::new(&state.pool).get(id).await?;

    Ok(Json(ShowFormPage {
        show_id: Some(id),
        form: ShowForm::from(&show),
    }))
}

/// POST /shows/{id}/edit - validate and update
async fn edit_show_submission(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Form(form): Form<ShowForm>,
) -> Result<Redirect, ApiError> {
    let fields = form.validate()?;
    ShowRepo::new(&state.pool).update(id, &fields).await?;
    Ok(Redirect::to(&format!("/shows/{}", id)))
}

/// DELETE /shows/{id}
async fn delete_show(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    ShowRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route(
            "/shows/create",
            get(create_show_form).post(create_show_submission),
        )
        .route("/shows/{id}", get(show_show).delete(delete_show))
        .route(
            "/shows/{id}/edit",
            get(edit_show_form).post(edit_show_submission),
        )
}
