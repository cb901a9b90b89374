use axum::http::StatusCode;

use crate::TestApp;

#[tokio::test]
async fn test_empty_create_writes_nothing() {
    let app = TestApp::new();
    let response = app.post_form("/catalog/genre/create", &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "genre_form");
    assert_eq!(response.error_fields(), vec!["name"]);
    assert_eq!(app.count("genres").await, 0);
}

#[tokio::test]
async fn test_create_is_idempotent_by_name() {
    let app = TestApp::new();
    let first = app.post_form("/catalog/genre/create", &[("name", "Fantasy")]).await;
    let second = app.post_form("/catalog/genre/create", &[("name", "  Fantasy ")]).await;

    assert_eq!(first.location(), second.location());
    assert_eq!(app.count("genres").await, 1);
}

#[tokio::test]
async fn test_create_then_detail() {
    let app = TestApp::new();
    let id = app.create_genre("Poetry").await;

    let response = app.get(&format!("/catalog/genre/{}", id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "genre_detail");
    assert_eq!(response.body["genre"]["id"], id.as_str());
    assert_eq!(response.body["genre"]["name"], "Poetry");
    assert_eq!(response.body["genre_books"], serde_json::json!([]));
}

#[tokio::test]
async fn test_update_keeps_id() {
    let app = TestApp::new();
    let id = app.create_genre("Poetry").await;

    let form = app.get(&format!("/catalog/genre/{}/update", id)).await;
    assert_eq!(form.body["title"], "Update Genre");
    assert_eq!(form.body["genre"]["name"], "Poetry");

    let response = app
        .post_form(&format!("/catalog/genre/{}/update", id), &[("name", "Verse")])
        .await;
    assert_eq!(response.location(), format!("/catalog/genre/{}", id));

    let detail = app.get(&format!("/catalog/genre/{}", id)).await;
    assert_eq!(detail.body["genre"]["name"], "Verse");
    assert_eq!(app.count("genres").await, 1);
}

#[tokio::test]
async fn test_update_to_taken_name_is_rejected() {
    let app = TestApp::new();
    app.create_genre("Horror").await;
    let id = app.create_genre("Poetry").await;

    let response = app
        .post_form(&format!("/catalog/genre/{}/update", id), &[("name", "Horror")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["errors"][0]["message"], "Genre name already exists");

    let detail = app.get(&format!("/catalog/genre/{}", id)).await;
    assert_eq!(detail.body["genre"]["name"], "Poetry");
}

#[tokio::test]
async fn test_delete_blocked_while_books_carry_genre() {
    let app = TestApp::new();
    let genre = app.create_genre("Science Fiction").await;
    let author = app.create_author("Frank", "Herbert").await;
    app.create_book("Dune", &author, &[genre.as_str()]).await;

    let response = app.post_form(&format!("/catalog/genre/{}/delete", genre), &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "genre_delete");
    assert_eq!(response.body["genre_books"][0]["title"], "Dune");

    assert_eq!(app.count("genres").await, 1);
    assert_eq!(app.count("books").await, 1);
}

#[tokio::test]
async fn test_delete_unreferenced_genre() {
    let app = TestApp::new();
    let genre = app.create_genre("Poetry").await;

    let confirm = app.get(&format!("/catalog/genre/{}/delete", genre)).await;
    assert_eq!(confirm.body["template"], "genre_delete");

    let response = app.post_form(&format!("/catalog/genre/{}/delete", genre), &[]).await;
    assert_eq!(response.location(), "/catalog/genres");
    assert_eq!(app.count("genres").await, 0);

    // a second delete of the same id finds nothing and goes back to the list
    let again = app.post_form(&format!("/catalog/genre/{}/delete", genre), &[]).await;
    assert_eq!(again.location(), "/catalog/genres");
}

#[tokio::test]
async fn test_list_sorted_by_name() {
    let app = TestApp::new();
    app.create_genre("Romance").await;
    app.create_genre("Fantasy").await;

    let response = app.get("/catalog/genres").await;
    let names: Vec<&str> = response.body["genre_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Fantasy", "Romance"]);
}
