//! Author workflows

use crate::{
    error::{AppError, AppResult},
    models::{author::AuthorView, Author, Book, Entity, Record},
    repository::Repository,
    validation::{validate, FieldError, Submission, Validated},
    views::{AuthorDeleteContext, AuthorDetailContext, AuthorFormContext, AuthorListContext, Page},
};

use super::{delete_if_unreferenced, lookup::LookupService};

#[derive(Clone)]
pub struct AuthorService {
    repository: Repository,
    lookup: LookupService,
}

impl AuthorService {
    pub fn new(repository: Repository, lookup: LookupService) -> Self {
        Self { repository, lookup }
    }

    /// All authors, sorted by family name
    pub async fn list(&self) -> AppResult<Page<AuthorListContext>> {
        let authors = self.repository.authors.list_sorted().await?;
        let author_list = authors.into_iter().map(AuthorView::from).collect();
        Ok(Page::render("author_list", "Author List", AuthorListContext { author_list }))
    }

    /// Author and their books
    pub async fn detail(&self, id: &str) -> AppResult<Page<AuthorDetailContext>> {
        let found = self.lookup.author_with_books(id).await?;
        let author = found.entity.ok_or_else(|| AppError::not_found(Author::LABEL))?;
        Ok(Page::render(
            "author_detail",
            "Author Detail",
            AuthorDetailContext {
                author: author.into(),
                author_books: found.dependents,
            },
        ))
    }

    pub fn create_form(&self) -> Page<AuthorFormContext> {
        form_page("Create Author", None, None, Vec::new())
    }

    pub async fn create(&self, submission: &Submission) -> AppResult<Page<AuthorFormContext>> {
        match validate::<Author>(submission) {
            Validated::Invalid { draft, errors } => {
                Ok(form_page("Create Author", None, Some(draft), errors))
            }
            Validated::Valid(author) => {
                let saved = self.repository.authors.save(&author).await?;
                tracing::info!("Author created: id={}", saved.id);
                Ok(Page::redirect(saved.url()))
            }
        }
    }

    pub async fn update_form(&self, id: &str) -> AppResult<Page<AuthorFormContext>> {
        let author = self
            .repository
            .authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(Author::LABEL))?;
        Ok(form_page(
            "Update Author",
            Some(author.id),
            Some(author.data),
            Vec::new(),
        ))
    }

    pub async fn update(&self, id: &str, submission: &Submission) -> AppResult<Page<AuthorFormContext>> {
        match validate::<Author>(submission) {
            Validated::Invalid { draft, errors } => Ok(form_page(
                "Update Author",
                Some(id.to_string()),
                Some(draft),
                errors,
            )),
            Validated::Valid(author) => {
                let updated = self.repository.authors.update_by_id(id, &author).await?;
                tracing::info!("Author updated: id={}", updated.id);
                Ok(Page::redirect(updated.url()))
            }
        }
    }

    pub async fn delete_form(&self, id: &str) -> AppResult<Page<AuthorDeleteContext>> {
        let found = self.lookup.author_with_books(id).await?;
        Ok(match found.entity {
            Some(author) => delete_page(author, found.dependents),
            None => Page::redirect(Author::LIST_URL),
        })
    }

    /// Delete unless a book still references the author
    pub async fn delete(&self, id: &str) -> AppResult<Page<AuthorDeleteContext>> {
        let found = self.lookup.author_with_books(id).await?;
        delete_if_unreferenced(&self.repository.authors, id, found, delete_page).await
    }
}

fn form_page(
    title: &str,
    id: Option<String>,
    author: Option<Author>,
    errors: Vec<FieldError>,
) -> Page<AuthorFormContext> {
    Page::render("author_form", title, AuthorFormContext { id, author, errors })
}

fn delete_page(author: Record<Author>, author_books: Vec<Record<Book>>) -> Page<AuthorDeleteContext> {
    Page::render(
        "author_delete",
        "Delete Author",
        AuthorDeleteContext {
            author: author.into(),
            author_books,
        },
    )
}
