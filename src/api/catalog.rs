//! Catalog home page

use axum::extract::State;

use crate::{
    error::AppResult,
    views::{IndexContext, Page},
    AppState,
};

/// Entity counts
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog index view with counts")
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Page<IndexContext>> {
    state.services.catalog.index().await
}
