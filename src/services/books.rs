//! Book workflows

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookView, Entity, Record},
    repository::Repository,
    validation::{validate, FieldError, Submission, Validated},
    views::{
        author_choices, genre_choices, BookDeleteContext, BookDetailContext, BookFormContext,
        BookListContext, Page,
    },
};

use super::{
    delete_if_unreferenced,
    lookup::{BookFormChoices, LookupService},
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
    lookup: LookupService,
}

impl BookService {
    pub fn new(repository: Repository, lookup: LookupService) -> Self {
        Self { repository, lookup }
    }

    /// Titles with their author, sorted by title
    pub async fn list(&self) -> AppResult<Page<BookListContext>> {
        let books = self.repository.books.list_titles_with_author().await?;
        let book_list = self.lookup.populate_books(books).await?;
        Ok(Page::render("book_list", "Book List", BookListContext { book_list }))
    }

    /// Populated book and its copies
    pub async fn detail(&self, id: &str) -> AppResult<Page<BookDetailContext>> {
        let found = self.lookup.book_detail(id).await?;
        let book = found.entity.ok_or_else(|| AppError::not_found(Book::LABEL))?;
        Ok(Page::render(
            "book_detail",
            book.title.clone(),
            BookDetailContext {
                book,
                book_instances: found.dependents,
            },
        ))
    }

    pub async fn create_form(&self) -> AppResult<Page<BookFormContext>> {
        let choices = self.lookup.book_form_choices().await?;
        Ok(form_page("Create Book", None, None, None, choices, Vec::new()))
    }

    pub async fn create(&self, submission: &Submission) -> AppResult<Page<BookFormContext>> {
        let book = match self.validate(submission).await? {
            Validated::Valid(book) => book,
            Validated::Invalid { draft, errors } => {
                return self.form_with_errors("Create Book", None, draft, errors).await;
            }
        };

        let saved = self.repository.books.save(&book).await?;
        tracing::info!("Book created: id={}", saved.id);
        Ok(Page::redirect(saved.url()))
    }

    /// Pre-filled form with the current author selected and genres checked
    pub async fn update_form(&self, id: &str) -> AppResult<Page<BookFormContext>> {
        let (book, choices) = self.lookup.book_for_update(id).await?;
        let book = book.ok_or_else(|| AppError::not_found(Book::LABEL))?;
        let data = book.data.clone();
        let current = self.lookup.populate_book(book).await?;
        Ok(form_page(
            "Update Book",
            Some(current.id.clone()),
            Some(data),
            Some(current),
            choices,
            Vec::new(),
        ))
    }

    pub async fn update(&self, id: &str, submission: &Submission) -> AppResult<Page<BookFormContext>> {
        let book = match self.validate(submission).await? {
            Validated::Valid(book) => book,
            Validated::Invalid { draft, errors } => {
                return self
                    .form_with_errors("Update Book", Some(id.to_string()), draft, errors)
                    .await;
            }
        };

        let updated = self.repository.books.update_by_id(id, &book).await?;
        tracing::info!("Book updated: id={}", updated.id);
        Ok(Page::redirect(updated.url()))
    }

    pub async fn delete_form(&self, id: &str) -> AppResult<Page<BookDeleteContext>> {
        let found = self.lookup.book_with_instances(id).await?;
        Ok(match found.entity {
            Some(book) => delete_page(book, found.dependents),
            None => Page::redirect(Book::LIST_URL),
        })
    }

    /// Delete unless copies of the book still exist
    pub async fn delete(&self, id: &str) -> AppResult<Page<BookDeleteContext>> {
        let found = self.lookup.book_with_instances(id).await?;
        delete_if_unreferenced(&self.repository.books, id, found, delete_page).await
    }

    /// Form rules, then the author reference must resolve
    async fn validate(&self, submission: &Submission) -> AppResult<Validated<Book>> {
        let validated = validate::<Book>(submission);
        let Validated::Valid(book) = validated else {
            return Ok(validated);
        };
        if self.repository.authors.exists(&book.author).await? {
            return Ok(Validated::Valid(book));
        }
        let errors = vec![FieldError::new("author", "Author not found", &book.author)];
        Ok(Validated::Invalid { draft: book, errors })
    }

    async fn form_with_errors(
        &self,
        title: &str,
        id: Option<String>,
        draft: Book,
        errors: Vec<FieldError>,
    ) -> AppResult<Page<BookFormContext>> {
        let choices = self.lookup.book_form_choices().await?;
        Ok(form_page(title, id, Some(draft), None, choices, errors))
    }
}

fn form_page(
    title: &str,
    id: Option<String>,
    book: Option<Book>,
    current: Option<BookView>,
    choices: BookFormChoices,
    errors: Vec<FieldError>,
) -> Page<BookFormContext> {
    let (selected_author, checked_genres) = match book {
        Some(ref book) => (book.author.as_str(), book.genre.as_slice()),
        None => ("", &[][..]),
    };
    let authors = author_choices(&choices.authors, selected_author);
    let genres = genre_choices(&choices.genres, checked_genres);
    Page::render(
        "book_form",
        title,
        BookFormContext {
            id,
            book,
            current,
            authors,
            genres,
            errors,
        },
    )
}

fn delete_page(book: Record<Book>, bookinstances_list: Vec<Record<BookInstance>>) -> Page<BookDeleteContext> {
    Page::render(
        "book_delete",
        "Delete Book",
        BookDeleteContext {
            book,
            bookinstances_list,
        },
    )
}
