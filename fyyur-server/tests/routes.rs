//! Router tests that never reach the database
//!
//! The pool is created lazily and never connects, so these cover routing,
//! form validation and error pages only.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use fyyur_server::{build_router, ServerConfig};

fn app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://fyyur@localhost/fyyur_unreachable")
        .expect("lazy pool");
    build_router(pool, &ServerConfig::default())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_route_is_generic_404() {
    let (status, body) = send(get("/no/such/page")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "page '/no/such/page' not found");
}

#[tokio::test]
async fn non_integer_ids_are_404() {
    for uri in ["/venues/abc", "/artists/0", "/shows/-1", "/venues/1.5/edit"] {
        let (status, body) = send(get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"], "not_found", "{}", uri);
    }
}

#[tokio::test]
async fn empty_venue_form() {
    let (status, body) = send(get("/venues/create")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["venue_id"], serde_json::Value::Null);
    assert_eq!(body["form"]["name"], "");
    assert_eq!(body["states"].as_array().unwrap().len(), 51);
}

#[tokio::test]
async fn empty_artist_form_offers_genres() {
    let (status, body) = send(get("/artists/create")).await;
    assert_eq!(status, StatusCode::OK);
    let genres = body["genres"].as_array().unwrap();
    assert!(genres.iter().any(|g| g == "Jazz"));
}

#[tokio::test]
async fn empty_show_form() {
    let (status, body) = send(get("/shows/create")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form"]["start_time"], "");
}

#[tokio::test]
async fn venue_without_name_is_rejected() {
    let (status, body) = send(form_post(
        "/venues/create",
        "city=San+Francisco&state=CA&address=1015+Folsom+Street",
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["field"], "name");
}

#[tokio::test]
async fn venue_with_bad_phone_is_rejected() {
    let (status, body) = send(form_post(
        "/venues/create",
        "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street&phone=123",
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "phone");
}

#[tokio::test]
async fn artist_with_unknown_genre_is_rejected() {
    let (status, body) = send(form_post(
        "/artists/create",
        "name=Guns+N+Petals&city=San+Francisco&state=CA&genres=Rock+n+Roll&genres=Polka",
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "genres");
    assert_eq!(body["message"], "invalid genres value: 'Polka'");
}

#[tokio::test]
async fn artist_edit_validates_before_loading() {
    let (status, body) = send(form_post(
        "/artists/7/edit",
        "name=Matt+Quevedo&city=New+York&state=ZZ&genres=Jazz",
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "state");
}

#[tokio::test]
async fn show_with_bad_start_time_is_rejected() {
    let (status, body) = send(form_post(
        "/shows/create",
        "venue_id=1&artist_id=4&start_time=whenever",
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "start_time");
}

#[tokio::test]
async fn create_requires_form_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/venues/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"x"}"#))
        .unwrap();

    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn search_is_post_only() {
    let (status, _) = send(get("/venues/search")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
