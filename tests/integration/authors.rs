use axum::http::StatusCode;

use crate::TestApp;

#[tokio::test]
async fn test_empty_create_reports_each_field_once() {
    let app = TestApp::new();
    let response = app.post_form("/catalog/author/create", &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "author_form");
    assert_eq!(response.error_fields(), vec!["first_name", "family_name"]);
    assert_eq!(app.count("authors").await, 0);
}

#[tokio::test]
async fn test_invalid_names_and_dates() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/catalog/author/create",
            &[
                ("first_name", "Jean-Paul"),
                ("family_name", "Sartre"),
                ("date_of_birth", "not a date"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.error_fields(), vec!["first_name", "date_of_birth"]);
    assert_eq!(
        response.body["errors"][0]["message"],
        "First name has non-alphanumeric characters."
    );
    assert_eq!(app.count("authors").await, 0);
}

#[tokio::test]
async fn test_create_update_round_trip() {
    let app = TestApp::new();
    let created = app
        .post_form(
            "/catalog/author/create",
            &[
                ("first_name", "Ursula"),
                ("family_name", "LeGuin"),
                ("date_of_birth", "1929-10-21"),
            ],
        )
        .await;
    let id = created.created_id();

    let detail = app.get(&format!("/catalog/author/{}", id)).await;
    assert_eq!(detail.body["author"]["name"], "LeGuin, Ursula");
    assert_eq!(detail.body["author"]["date_of_birth"], "1929-10-21");
    assert_eq!(detail.body["author"]["url"], format!("/catalog/author/{}", id));

    let updated = app
        .post_form(
            &format!("/catalog/author/{}/update", id),
            &[
                ("first_name", "Ursula"),
                ("family_name", "LeGuin"),
                ("date_of_birth", "1929-10-21"),
                ("date_of_death", "2018-01-22"),
            ],
        )
        .await;
    assert_eq!(updated.location(), format!("/catalog/author/{}", id));

    let detail = app.get(&format!("/catalog/author/{}", id)).await;
    assert_eq!(detail.body["author"]["date_of_death"], "2018-01-22");
    assert_eq!(app.count("authors").await, 1);
}

#[tokio::test]
async fn test_update_missing_author_is_404() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/catalog/author/6a0e9b8c-41de-4c3a-9a57-2a9b1f6f3c10/update",
            &[("first_name", "Ada"), ("family_name", "Lovelace")],
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.count("authors").await, 0);
}

#[tokio::test]
async fn test_delete_blocked_while_books_reference_author() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;
    app.create_book("Dune", &author, &[]).await;

    let response = app.post_form(&format!("/catalog/author/{}/delete", author), &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "author_delete");
    assert_eq!(response.body["author_books"].as_array().unwrap().len(), 1);
    assert_eq!(app.count("authors").await, 1);
}

#[tokio::test]
async fn test_delete_unreferenced_author() {
    let app = TestApp::new();
    let author = app.create_author("Frank", "Herbert").await;

    let response = app.post_form(&format!("/catalog/author/{}/delete", author), &[]).await;
    assert_eq!(response.location(), "/catalog/authors");
    assert_eq!(app.count("authors").await, 0);
}

#[tokio::test]
async fn test_list_sorted_by_family_name() {
    let app = TestApp::new();
    app.create_author("Isaac", "Asimov").await;
    app.create_author("Ben", "Bova").await;
    app.create_author("Arthur", "Clarke").await;

    let response = app.get("/catalog/authors").await;
    let names: Vec<&str> = response.body["author_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["family_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Asimov", "Bova", "Clarke"]);
}
