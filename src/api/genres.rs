//! Genre endpoints

use axum::extract::{Path, State};

use crate::{
    error::AppResult,
    views::{GenreDeleteContext, GenreDetailContext, GenreFormContext, GenreListContext, Page},
    AppState,
};

use super::FormSubmission;

/// List all genres
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genre list view")
    )
)]
pub async fn list(State(state): State<AppState>) -> AppResult<Page<GenreListContext>> {
    state.services.genres.list().await
}

/// Genre details with its books
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre detail view"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<GenreDetailContext>> {
    state.services.genres.detail(&id).await
}

/// Empty genre form
#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses(
        (status = 200, description = "Genre form view")
    )
)]
pub async fn create_form(State(state): State<AppState>) -> Page<GenreFormContext> {
    state.services.genres.create_form()
}

/// Create a genre, or redirect to the one with the same name
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Genre fields"),
    responses(
        (status = 200, description = "Form re-rendered with errors"),
        (status = 303, description = "Created, redirect to the genre")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    FormSubmission(submission): FormSubmission,
) -> AppResult<Page<GenreFormContext>> {
    state.services.genres.create(&submission).await
}

/// Pre-filled genre form
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre form view"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<GenreFormContext>> {
    state.services.genres.update_form(&id).await
}

/// Rename a genre
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "Genre fields"),
    responses(
        (status = 200, description = "Form re-rendered with errors"),
        (status = 303, description = "Updated, redirect to the genre"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormSubmission(submission): FormSubmission,
) -> AppResult<Page<GenreFormContext>> {
    state.services.genres.update(&id, &submission).await
}

/// Delete confirmation, listing blocking books
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Delete confirmation view"),
        (status = 303, description = "Genre already gone, redirect to the list")
    )
)]
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Page<GenreDeleteContext>> {
    state.services.genres.delete_form(&id).await
}

/// Delete a genre that no book carries
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(
        ("id" = String, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Still referenced, confirmation re-rendered"),
        (status = 303, description = "Deleted, redirect to the list")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page<GenreDeleteContext>> {
    state.services.genres.delete(&id).await
}
