//! Author endpoints

use axum::extract::{Path, State};

use crate::{
    error::AppResult,
    views::{AuthorDeleteContext, AuthorDetailContext, AuthorFormContext, AuthorListContext, Page},
    AppState,
};

use super::FormSubmission;

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list view")
    )
)]
pub async fn list(State(state): State<AppState>) -> AppResult<Page<AuthorListContext>> {
    state.services.authors.list().await
}

/// Author details with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author detail view"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<AuthorDetailContext>> {
    state.services.authors.detail(&id).await
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Author form view")
    )
)]
pub async fn create_form(State(state): State<AppState>) -> Page<AuthorFormContext> {
    state.services.authors.create_form()
}

/// Create an author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Author fields"),
    responses(
        (status = 200, description = "Form re-rendered with errors"),
        (status = 303, description = "Created, redirect to the author")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    FormSubmission(submission): FormSubmission,
) -> AppResult<Page<AuthorFormContext>> {
    state.services.authors.create(&submission).await
}

/// Pre-filled author form
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author form view"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<AuthorFormContext>> {
    state.services.authors.update_form(&id).await
}

/// Replace an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author ID")
    ),
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Author fields"),
    responses(
        (status = 200, description = "Form re-rendered with errors"),
        (status = 303, description = "Updated, redirect to the author"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormSubmission(submission): FormSubmission,
) -> AppResult<Page<AuthorFormContext>> {
    state.services.authors.update(&id, &submission).await
}

/// Delete confirmation, listing blocking books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation view"),
        (status = 303, description = "Author already gone, redirect to the list")
    )
)]
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<AuthorDeleteContext>> {
    state.services.authors.delete_form(&id).await
}

/// Delete an author that no book references
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(
        ("id" = String, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Still referenced, confirmation re-rendered"),
        (status = 303, description = "Deleted, redirect to the list")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page<AuthorDeleteContext>> {
    state.services.authors.delete(&id).await
}
