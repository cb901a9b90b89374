//! Routing, health and error mapping

use axum::http::{header, StatusCode};
use locallib_server::store::DocumentStore;

use crate::TestApp;

const MISSING_ID: &str = "0b9c5d5e-2f7a-4a51-9d3e-5a8f0c6b7e21";

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_pings_store() {
    let app = TestApp::new();
    assert_eq!(app.get("/ready").await.status, StatusCode::OK);

    app.store.close().await;
    let response = app.get("/ready").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = TestApp::new();
    let response = app.get("/").await;
    assert_eq!(response.location(), "/catalog");
}

#[tokio::test]
async fn test_index_counts() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;
    let genre = app.create_genre("Science Fiction").await;
    let book = app.create_book("Dune", &author, &[genre.as_str()]).await;
    app.create_copy(&book, "Available").await;
    app.create_copy(&book, "Loaned").await;

    let response = app.get("/catalog").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "index");
    assert_eq!(response.body["title"], "Local Library Home");

    let data = &response.body["data"];
    assert_eq!(data["book_count"], 1);
    assert_eq!(data["book_instance_count"], 2);
    assert_eq!(data["book_instance_available_count"], 1);
    assert_eq!(data["author_count"], 1);
    assert_eq!(data["genre_count"], 1);
}

#[tokio::test]
async fn test_missing_detail_is_404() {
    let app = TestApp::new();
    for route in ["book", "author", "genre", "bookinstance"] {
        let response = app.get(&format!("/catalog/{}/{}", route, MISSING_ID)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "route {}", route);
    }

    let response = app.get(&format!("/catalog/genre/{}", MISSING_ID)).await;
    assert_eq!(response.body["message"], "Genre not found");
}

#[tokio::test]
async fn test_malformed_id_is_server_error() {
    let app = TestApp::new();
    let response = app.get("/catalog/book/not-an-id").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();
    let response = app.get("/no/such/page").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers[header::X_FRAME_OPTIONS], "SAMEORIGIN");
}
