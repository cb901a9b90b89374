use axum::http::StatusCode;
use serde_json::json;

use crate::TestApp;

#[tokio::test]
async fn test_empty_create_writes_nothing() {
    let app = TestApp::new();
    let response = app.post_form("/catalog/book/create", &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "book_form");
    assert_eq!(response.error_fields(), vec!["title", "author", "summary", "isbn"]);
    assert_eq!(app.count("books").await, 0);
}

#[tokio::test]
async fn test_create_form_offers_choices() {
    let app = TestApp::new();
    app.create_author("Frank", "Herbert").await;
    app.create_genre("Science Fiction").await;

    let response = app.get("/catalog/book/create").await;
    assert_eq!(response.body["title"], "Create Book");
    assert_eq!(response.body["authors"][0]["label"], "Herbert, Frank");
    assert_eq!(response.body["genres"][0]["label"], "Science Fiction");
    assert_eq!(response.body["genres"][0]["selected"], false);
}

#[tokio::test]
async fn test_unknown_author_is_rejected() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/catalog/book/create",
            &[
                ("title", "Dune"),
                ("author", "5d7c2c8e-9a86-4b55-8d7b-3a5f0e9c1b42"),
                ("summary", "Spice."),
                ("isbn", "9780441013593"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["errors"][0]["message"], "Author not found");
    assert_eq!(app.count("books").await, 0);
}

#[tokio::test]
async fn test_single_genre_becomes_a_list() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;
    let response = app
        .post_form(
            "/catalog/book/create",
            &[
                ("title", "Dune"),
                ("author", author.as_str()),
                ("summary", "Spice."),
                ("isbn", "9780441013593"),
                ("genre", "g1"),
            ],
        )
        .await;
    let id = response.created_id();

    let form = app.get(&format!("/catalog/book/{}/update", id)).await;
    assert_eq!(form.body["book"]["genre"], json!(["g1"]));
}

#[tokio::test]
async fn test_detail_populates_references() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;
    let sf = app.create_genre("Science Fiction").await;
    let classic = app.create_genre("Classic").await;
    let book = app.create_book("Dune", &author, &[sf.as_str(), classic.as_str()]).await;
    app.create_copy(&book, "Available").await;

    let response = app.get(&format!("/catalog/book/{}", book)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Dune");
    assert_eq!(response.body["book"]["author_name"], "Herbert, Frank");
    assert_eq!(response.body["book"]["genre"].as_array().unwrap().len(), 2);
    assert_eq!(response.body["book_instances"][0]["status"], "Available");
}

#[tokio::test]
async fn test_update_replaces_all_fields_and_keeps_id() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;
    let other = app.create_author("Brian", "Herbert").await;
    let genre = app.create_genre("Science Fiction").await;
    let book = app.create_book("Dune", &author, &[genre.as_str()]).await;

    let form = app.get(&format!("/catalog/book/{}/update", book)).await;
    let checked: Vec<bool> = form.body["genres"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["selected"].as_bool().unwrap())
        .collect();
    assert_eq!(checked, vec![true]);
    assert_eq!(form.body["current"]["author_name"], "Herbert, Frank");
    assert_eq!(form.body["current"]["genre"][0]["name"], "Science Fiction");

    let response = app
        .post_form(
            &format!("/catalog/book/{}/update", book),
            &[
                ("title", "Dune Messiah"),
                ("author", other.as_str()),
                ("summary", "Sequel."),
                ("isbn", "9780441172696"),
            ],
        )
        .await;
    assert_eq!(response.location(), format!("/catalog/book/{}", book));

    let detail = app.get(&format!("/catalog/book/{}", book)).await;
    assert_eq!(detail.body["book"]["title"], "Dune Messiah");
    assert_eq!(detail.body["book"]["author_name"], "Herbert, Brian");
    assert_eq!(detail.body["book"]["genre"], json!([]));
    assert_eq!(app.count("books").await, 1);
}

#[tokio::test]
async fn test_delete_blocked_while_copies_exist() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;
    let book = app.create_book("Dune", &author, &[]).await;
    app.create_copy(&book, "Loaned").await;

    let response = app.post_form(&format!("/catalog/book/{}/delete", book), &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "book_delete");
    assert_eq!(response.body["bookinstances_list"].as_array().unwrap().len(), 1);
    assert_eq!(app.count("books").await, 1);
    assert_eq!(app.count("bookinstances").await, 1);
}

#[tokio::test]
async fn test_delete_without_copies() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;
    let book = app.create_book("Dune", &author, &[]).await;

    let response = app.post_form(&format!("/catalog/book/{}/delete", book), &[]).await;
    assert_eq!(response.location(), "/catalog/books");
    assert_eq!(app.count("books").await, 0);
}

#[tokio::test]
async fn test_list_sorted_by_title_with_author_names() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;
    app.create_book("Dune Messiah", &author, &[]).await;
    app.create_book("Children of Dune", &author, &[]).await;

    let response = app.get("/catalog/books").await;
    let list = response.body["book_list"].as_array().unwrap();
    assert_eq!(list[0]["title"], "Children of Dune");
    assert_eq!(list[1]["title"], "Dune Messiah");
    assert_eq!(list[0]["author_name"], "Herbert, Frank");
}

#[tokio::test]
async fn test_unchanged_update_round_trip() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;
    let genre = app.create_genre("Science Fiction").await;
    let book = app.create_book("Dune", &author, &[genre.as_str()]).await;

    let before = app.get(&format!("/catalog/book/{}", book)).await;

    let response = app
        .post_form(
            &format!("/catalog/book/{}/update", book),
            &[
                ("title", "Dune"),
                ("author", author.as_str()),
                ("summary", "A summary."),
                ("isbn", "9780441013593"),
                ("genre", genre.as_str()),
            ],
        )
        .await;
    assert_eq!(response.location(), format!("/catalog/book/{}", book));

    let after = app.get(&format!("/catalog/book/{}", book)).await;
    assert_eq!(before.body, after.body);
}

#[tokio::test]
async fn test_create_form_has_no_current_book() {
    let app = TestApp::new();
    let form = app.get("/catalog/book/create").await;
    assert!(form.body["current"].is_null());
}
