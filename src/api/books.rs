//! Book endpoints

use axum::extract::{Path, State};

use crate::{
    error::AppResult,
    views::{BookDeleteContext, BookDetailContext, BookFormContext, BookListContext, Page},
    AppState,
};

use super::FormSubmission;

/// List all books with their authors
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list view")
    )
)]
pub async fn list(State(state): State<AppState>) -> AppResult<Page<BookListContext>> {
    state.services.books.list().await
}

/// Book details with its copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book detail view"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<BookDetailContext>> {
    state.services.books.detail(&id).await
}

/// Empty book form with author and genre choices
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses(
        (status = 200, description = "Book form view")
    )
)]
pub async fn create_form(State(state): State<AppState>) -> AppResult<Page<BookFormContext>> {
    state.services.books.create_form().await
}

/// Create a book
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Book fields, genre may repeat"),
    responses(
        (status = 200, description = "Form re-rendered with errors"),
        (status = 303, description = "Created, redirect to the book")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    FormSubmission(submission): FormSubmission,
) -> AppResult<Page<BookFormContext>> {
    state.services.books.create(&submission).await
}

/// Pre-filled book form
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book form view"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<BookFormContext>> {
    state.services.books.update_form(&id).await
}

/// Replace a book
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Book fields, genre may repeat"),
    responses(
        (status = 200, description = "Form re-rendered with errors"),
        (status = 303, description = "Updated, redirect to the book"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormSubmission(submission): FormSubmission,
) -> AppResult<Page<BookFormContext>> {
    state.services.books.update(&id, &submission).await
}

/// Delete confirmation, listing blocking copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation view"),
        (status = 303, description = "Book already gone, redirect to the list")
    )
)]
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<BookDeleteContext>> {
    state.services.books.delete_form(&id).await
}

/// Delete a book with no copies
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Still referenced, confirmation re-rendered"),
        (status = 303, description = "Deleted, redirect to the list")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page<BookDeleteContext>> {
    state.services.books.delete(&id).await
}
