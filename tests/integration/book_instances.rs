use axum::http::StatusCode;

use crate::TestApp;

async fn seeded_book(app: &TestApp, title: &str) -> String {
    let author = app.create_author("Frank", "Herbert").await;
    app.create_book(title, &author, &[]).await
}

#[tokio::test]
async fn test_empty_create_writes_nothing() {
    let app = TestApp::new();
    let response = app.post_form("/catalog/bookinstance/create", &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["template"], "bookinstance_form");
    assert_eq!(response.error_fields(), vec!["book", "imprint"]);
    assert_eq!(app.count("bookinstances").await, 0);
}

#[tokio::test]
async fn test_defaults_to_maintenance_without_due_date() {
    let app = TestApp::new();
    let book = seeded_book(&app, "Dune").await;

    let response = app
        .post_form(
            "/catalog/bookinstance/create",
            &[("book", book.as_str()), ("imprint", "Ace, 1990"), ("status", ""), ("due_back", "")],
        )
        .await;
    let id = response.created_id();

    let detail = app.get(&format!("/catalog/bookinstance/{}", id)).await;
    assert_eq!(detail.body["title"], "Copy: Dune");
    assert_eq!(detail.body["bookinstance"]["status"], "Maintenance");
    assert!(detail.body["bookinstance"]["due_back"].is_null());
    assert_eq!(detail.body["bookinstance"]["due_back_formatted"], "");
}

#[tokio::test]
async fn test_invalid_status_and_date() {
    let app = TestApp::new();
    let book = seeded_book(&app, "Dune").await;

    let response = app
        .post_form(
            "/catalog/bookinstance/create",
            &[
                ("book", book.as_str()),
                ("imprint", "Ace, 1990"),
                ("status", "Lost"),
                ("due_back", "31/12/2024"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.error_fields(), vec!["status", "due_back"]);
    assert_eq!(response.body["errors"][0]["value"], "Lost");
    assert_eq!(app.count("bookinstances").await, 0);

    // the rejected status is not swapped for another choice
    let selected = response.body["statuses"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["selected"] == true)
        .count();
    assert_eq!(selected, 0);
}

#[tokio::test]
async fn test_due_date_on_available_copy_is_rejected() {
    let app = TestApp::new();
    let book = seeded_book(&app, "Dune").await;

    let response = app
        .post_form(
            "/catalog/bookinstance/create",
            &[
                ("book", book.as_str()),
                ("imprint", "Ace, 1990"),
                ("status", "Available"),
                ("due_back", "2024-12-31"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.error_fields(), vec!["due_back"]);
    assert_eq!(app.count("bookinstances").await, 0);
}

#[tokio::test]
async fn test_unknown_book_is_rejected() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/catalog/bookinstance/create",
            &[
                ("book", "4e1f7b0a-6c2d-4f8e-b3a9-0d5c7e2f1a63"),
                ("imprint", "Ace, 1990"),
            ],
        )
        .await;
    assert_eq!(response.body["errors"][0]["message"], "Book not found");
    assert_eq!(app.count("bookinstances").await, 0);
}

#[tokio::test]
async fn test_loaned_copy_round_trip() {
    let app = TestApp::new();
    let book = seeded_book(&app, "Dune").await;

    let id = app
        .post_form(
            "/catalog/bookinstance/create",
            &[
                ("book", book.as_str()),
                ("imprint", "Ace, 1990"),
                ("status", "Loaned"),
                ("due_back", "2024-03-05"),
            ],
        )
        .await
        .created_id();

    let detail = app.get(&format!("/catalog/bookinstance/{}", id)).await;
    assert_eq!(detail.body["bookinstance"]["due_back"], "2024-03-05");
    assert_eq!(detail.body["bookinstance"]["due_back_formatted"], "Mar 5, 2024");

    let form = app.get(&format!("/catalog/bookinstance/{}/update", id)).await;
    let selected: Vec<&str> = form.body["statuses"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["selected"] == true)
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(selected, vec!["Loaned"]);
    assert_eq!(form.body["current"]["book"]["title"], "Dune");
    assert_eq!(form.body["current"]["due_back_formatted"], "Mar 5, 2024");

    let updated = app
        .post_form(
            &format!("/catalog/bookinstance/{}/update", id),
            &[("book", book.as_str()), ("imprint", "Ace, 1990"), ("status", "Available")],
        )
        .await;
    assert_eq!(updated.location(), format!("/catalog/bookinstance/{}", id));

    let detail = app.get(&format!("/catalog/bookinstance/{}", id)).await;
    assert_eq!(detail.body["bookinstance"]["status"], "Available");
    assert!(detail.body["bookinstance"]["due_back"].is_null());
}

#[tokio::test]
async fn test_delete_copy() {
    let app = TestApp::new();
    let book = seeded_book(&app, "Dune").await;
    let id = app.create_copy(&book, "Available").await;

    let confirm = app.get(&format!("/catalog/bookinstance/{}/delete", id)).await;
    assert_eq!(confirm.body["template"], "bookinstance_delete");

    let response = app.post_form(&format!("/catalog/bookinstance/{}/delete", id), &[]).await;
    assert_eq!(response.location(), "/catalog/bookinstances");
    assert_eq!(app.count("bookinstances").await, 0);
    assert_eq!(app.count("books").await, 1);
}

#[tokio::test]
async fn test_list_sorted_by_book_title() {
    let app = TestApp::new();
    let zen = seeded_book(&app, "Zen and the Art").await;
    let anathem = seeded_book(&app, "Anathem").await;
    app.create_copy(&zen, "Available").await;
    app.create_copy(&anathem, "Reserved").await;

    let response = app.get("/catalog/bookinstances").await;
    let list = response.body["bookinstance_list"].as_array().unwrap();
    assert_eq!(list[0]["book"]["title"], "Anathem");
    assert_eq!(list[1]["book"]["title"], "Zen and the Art");
}
