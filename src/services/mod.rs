//! Catalog workflows: validation, lookups and repository calls combined into
//! list / detail / create / update / delete for each entity type

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod lookup;

use crate::{
    error::{AppError, AppResult},
    models::{Entity, Record},
    repository::{EntityRepository, Repository},
    views::Page,
};

use lookup::Dependents;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub lookup: lookup::LookupService,
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorService,
    pub genres: genres::GenreService,
    pub books: books::BookService,
    pub book_instances: book_instances::BookInstanceService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let lookup = lookup::LookupService::new(repository.clone());
        Self {
            catalog: catalog::CatalogService::new(lookup.clone()),
            authors: authors::AuthorService::new(repository.clone(), lookup.clone()),
            genres: genres::GenreService::new(repository.clone(), lookup.clone()),
            books: books::BookService::new(repository.clone(), lookup.clone()),
            book_instances: book_instances::BookInstanceService::new(repository, lookup.clone()),
            lookup,
        }
    }
}

/// Final step of every delete. `found` must be read just before calling:
/// existing dependents render the blocking view and nothing is removed; an
/// entity that is already gone goes back to the list.
pub(crate) async fn delete_if_unreferenced<E, D, C>(
    repository: &EntityRepository<E>,
    id: &str,
    found: Dependents<Record<E>, D>,
    blocking_view: impl FnOnce(Record<E>, Vec<D>) -> Page<C>,
) -> AppResult<Page<C>>
where
    E: Entity,
{
    let Some(entity) = found.entity else {
        return Ok(Page::redirect(E::LIST_URL));
    };

    if !found.dependents.is_empty() {
        tracing::info!(
            "{} delete blocked: id={} still has {} dependent(s)",
            E::LABEL,
            id,
            found.dependents.len()
        );
        return Ok(blocking_view(entity, found.dependents));
    }

    match repository.delete_by_id(id).await {
        // removed concurrently since the re-check
        Ok(()) | Err(AppError::NotFound(_)) => {}
        Err(e) => return Err(e),
    }
    tracing::info!("{} deleted: id={}", E::LABEL, id);
    Ok(Page::redirect(E::LIST_URL))
}
