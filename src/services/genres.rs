//! Genre workflows

use crate::{
    error::{AppError, AppResult},
    models::{Book, Entity, Genre, Record},
    repository::Repository,
    validation::{validate, FieldError, Submission, Validated},
    views::{GenreDeleteContext, GenreDetailContext, GenreFormContext, GenreListContext, Page},
};

use super::{delete_if_unreferenced, lookup::LookupService};

#[derive(Clone)]
pub struct GenreService {
    repository: Repository,
    lookup: LookupService,
}

impl GenreService {
    pub fn new(repository: Repository, lookup: LookupService) -> Self {
        Self { repository, lookup }
    }

    /// All genres, sorted by name
    pub async fn list(&self) -> AppResult<Page<GenreListContext>> {
        let genre_list = self.repository.genres.list_sorted().await?;
        Ok(Page::render("genre_list", "Genre List", GenreListContext { genre_list }))
    }

    /// Genre and the books carrying it
    pub async fn detail(&self, id: &str) -> AppResult<Page<GenreDetailContext>> {
        let found = self.lookup.genre_with_books(id).await?;
        let genre = found.entity.ok_or_else(|| AppError::not_found(Genre::LABEL))?;
        Ok(Page::render(
            "genre_detail",
            "Genre Detail",
            GenreDetailContext {
                genre,
                genre_books: found.dependents,
            },
        ))
    }

    pub fn create_form(&self) -> Page<GenreFormContext> {
        form_page("Create Genre", None, None, Vec::new())
    }

    /// Create, or redirect to the genre that already has this name
    pub async fn create(&self, submission: &Submission) -> AppResult<Page<GenreFormContext>> {
        let genre = match validate::<Genre>(submission) {
            Validated::Valid(genre) => genre,
            Validated::Invalid { draft, errors } => {
                return Ok(form_page("Create Genre", None, Some(draft), errors));
            }
        };

        if let Some(existing) = self.repository.genres.find_by_name(&genre.name).await? {
            tracing::info!("Genre create: name already used by id={}, redirecting", existing.id);
            return Ok(Page::redirect(existing.url()));
        }

        let saved = self.repository.genres.save(&genre).await?;
        tracing::info!("Genre created: id={}", saved.id);
        Ok(Page::redirect(saved.url()))
    }

    pub async fn update_form(&self, id: &str) -> AppResult<Page<GenreFormContext>> {
        let genre = self
            .repository
            .genres
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(Genre::LABEL))?;
        Ok(form_page(
            "Update Genre",
            Some(genre.id),
            Some(genre.data),
            Vec::new(),
        ))
    }

    /// Replace the name; a name held by another genre is a field error
    pub async fn update(&self, id: &str, submission: &Submission) -> AppResult<Page<GenreFormContext>> {
        let genre = match validate::<Genre>(submission) {
            Validated::Valid(genre) => genre,
            Validated::Invalid { draft, errors } => {
                return Ok(form_page("Update Genre", Some(id.to_string()), Some(draft), errors));
            }
        };

        if let Some(existing) = self.repository.genres.find_by_name(&genre.name).await? {
            if existing.id != id {
                let error = FieldError::new("name", "Genre name already exists", &genre.name);
                return Ok(form_page(
                    "Update Genre",
                    Some(id.to_string()),
                    Some(genre),
                    vec![error],
                ));
            }
        }

        let updated = self.repository.genres.update_by_id(id, &genre).await?;
        tracing::info!("Genre updated: id={}", updated.id);
        Ok(Page::redirect(updated.url()))
    }

    /// Confirmation page; a stale link to a deleted genre goes back to the list
    pub async fn delete_form(&self, id: &str) -> AppResult<Page<GenreDeleteContext>> {
        let found = self.lookup.genre_with_books(id).await?;
        Ok(match found.entity {
            Some(genre) => delete_page(genre, found.dependents),
            None => Page::redirect(Genre::LIST_URL),
        })
    }

    /// Delete unless a book still carries the genre
    pub async fn delete(&self, id: &str) -> AppResult<Page<GenreDeleteContext>> {
        let found = self.lookup.genre_with_books(id).await?;
        delete_if_unreferenced(&self.repository.genres, id, found, delete_page).await
    }
}

fn form_page(
    title: &str,
    id: Option<String>,
    genre: Option<Genre>,
    errors: Vec<FieldError>,
) -> Page<GenreFormContext> {
    Page::render("genre_form", title, GenreFormContext { id, genre, errors })
}

fn delete_page(
    genre: Record<Genre>,
    genre_books: Vec<Record<Book>>,
) -> Page<GenreDeleteContext> {
    Page::render("genre_delete", "Delete Genre", GenreDeleteContext { genre, genre_books })
}
