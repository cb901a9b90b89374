//! Book instance (copy) endpoints

use axum::extract::{Path, State};

use crate::{
    error::AppResult,
    views::{BookInstanceDeleteContext, BookInstanceDetailContext, BookInstanceFormContext, BookInstanceListContext, Page},
    AppState,
};

use super::FormSubmission;

/// List all copies, sorted by book title
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Copy list view")
    )
)]
pub async fn list(State(state): State<AppState>) -> AppResult<Page<BookInstanceListContext>> {
    state.services.book_instances.list().await
}

/// Copy details with its book
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book copy ID")
    ),
    responses(
        (status = 200, description = "Copy detail view"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<BookInstanceDetailContext>> {
    state.services.book_instances.detail(&id).await
}

/// Empty copy form with book choices
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Copy form view")
    )
)]
pub async fn create_form(State(state): State<AppState>) -> AppResult<Page<BookInstanceFormContext>> {
    state.services.book_instances.create_form().await
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Book copy fields"),
    responses(
        (status = 200, description = "Form re-rendered with errors"),
        (status = 303, description = "Created, redirect to the copy")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    FormSubmission(submission): FormSubmission,
) -> AppResult<Page<BookInstanceFormContext>> {
    state.services.book_instances.create(&submission).await
}

/// Pre-filled copy form
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book copy ID")
    ),
    responses(
        (status = 200, description = "Copy form view"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<BookInstanceFormContext>> {
    state.services.book_instances.update_form(&id).await
}

/// Replace a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book copy ID")
    ),
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Book copy fields"),
    responses(
        (status = 200, description = "Form re-rendered with errors"),
        (status = 303, description = "Updated, redirect to the copy"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormSubmission(submission): FormSubmission,
) -> AppResult<Page<BookInstanceFormContext>> {
    state.services.book_instances.update(&id, &submission).await
}

/// Delete confirmation
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book copy ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation view"),
        (status = 303, description = "Copy already gone, redirect to the list")
    )
)]
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<BookInstanceDeleteContext>> {
    state.services.book_instances.delete_form(&id).await
}

/// Delete a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(
        ("id" = String, Path, description = "Book copy ID")
    ),
    responses(
        (status = 303, description = "Deleted, redirect to the list")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page<BookInstanceDeleteContext>> {
    state.services.book_instances.delete(&id).await
}
