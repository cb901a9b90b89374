//! Lookup aggregator: independent reads run concurrently and are joined
//! before the workflow continues.
//!
//! Every aggregate uses `tokio::try_join!`, so the member reads make progress
//! together, the caller sees either all results at once or the first error,
//! and the remaining reads are dropped on failure.

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookInstance, BookInstanceView, BookView, Genre, Record},
    repository::Repository,
    store::Filter,
    views::CatalogCounts,
};

/// An entity (if it still exists) plus everything that references it
#[derive(Debug, Clone, PartialEq)]
pub struct Dependents<E, D> {
    pub entity: Option<E>,
    pub dependents: Vec<D>,
}

/// Reference choices for the book form
#[derive(Debug, Clone, PartialEq)]
pub struct BookFormChoices {
    pub authors: Vec<Record<Author>>,
    pub genres: Vec<Record<Genre>>,
}

#[derive(Clone)]
pub struct LookupService {
    repository: Repository,
}

impl LookupService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Entity counts for the catalog home page
    pub async fn catalog_counts(&self) -> AppResult<CatalogCounts> {
        let repo = &self.repository;
        let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) = tokio::try_join!(
            repo.books.count(&Filter::All),
            repo.book_instances.count(&Filter::All),
            repo.book_instances.count_available(),
            repo.authors.count(&Filter::All),
            repo.genres.count(&Filter::All),
        )?;

        Ok(CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }

    /// All authors and genres, for the book form
    pub async fn book_form_choices(&self) -> AppResult<BookFormChoices> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors.list_sorted(),
            self.repository.genres.list_sorted(),
        )?;
        Ok(BookFormChoices { authors, genres })
    }

    /// The book being edited plus the form choices
    pub async fn book_for_update(&self, id: &str) -> AppResult<(Option<Record<Book>>, BookFormChoices)> {
        let (book, authors, genres) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.repository.authors.list_sorted(),
            self.repository.genres.list_sorted(),
        )?;
        Ok((book, BookFormChoices { authors, genres }))
    }

    /// The copy being edited plus the book choices
    pub async fn book_instance_for_update(
        &self,
        id: &str,
    ) -> AppResult<(Option<Record<BookInstance>>, Vec<Record<Book>>)> {
        tokio::try_join!(
            self.repository.book_instances.find_by_id(id),
            self.repository.books.list_titles(),
        )
    }

    /// Author and the books that reference it
    pub async fn author_with_books(&self, id: &str) -> AppResult<Dependents<Record<Author>, Record<Book>>> {
        let (entity, dependents) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.by_author(id),
        )?;
        Ok(Dependents { entity, dependents })
    }

    /// Genre and the books that carry it
    pub async fn genre_with_books(&self, id: &str) -> AppResult<Dependents<Record<Genre>, Record<Book>>> {
        let (entity, dependents) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.by_genre(id),
        )?;
        Ok(Dependents { entity, dependents })
    }

    /// Book and its copies
    pub async fn book_with_instances(
        &self,
        id: &str,
    ) -> AppResult<Dependents<Record<Book>, Record<BookInstance>>> {
        let (entity, dependents) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.repository.book_instances.of_book(id),
        )?;
        Ok(Dependents { entity, dependents })
    }

    /// Populated book and its copies, for the detail page
    pub async fn book_detail(&self, id: &str) -> AppResult<Dependents<BookView, Record<BookInstance>>> {
        let (entity, dependents) = tokio::try_join!(
            self.find_book_view(id),
            self.repository.book_instances.of_book(id),
        )?;
        Ok(Dependents { entity, dependents })
    }

    /// Book with its references resolved
    pub async fn find_book_view(&self, id: &str) -> AppResult<Option<BookView>> {
        match self.repository.books.find_by_id(id).await? {
            Some(book) => Ok(Some(self.populate_book(book).await?)),
            None => Ok(None),
        }
    }

    /// Copy with its book resolved
    pub async fn book_instance_detail(&self, id: &str) -> AppResult<Option<BookInstanceView>> {
        match self.repository.book_instances.find_by_id(id).await? {
            Some(instance) => Ok(Some(self.populate_book_instance(instance).await?)),
            None => Ok(None),
        }
    }

    /// Expand a book's author and genre references
    pub async fn populate_book(&self, book: Record<Book>) -> AppResult<BookView> {
        let author_ids = [book.data.author.clone()];
        let (mut authors, genre) = tokio::try_join!(
            self.repository.authors.find_by_ids(&author_ids),
            self.repository.genres.find_by_ids(&book.data.genre),
        )?;
        let author = authors.pop();
        Ok(BookView::new(book, author, genre))
    }

    /// Expand the author of every book with a single batched read
    pub async fn populate_books(&self, books: Vec<Record<Book>>) -> AppResult<Vec<BookView>> {
        let author_ids: Vec<String> = books.iter().map(|b| b.data.author.clone()).collect();
        let authors: HashMap<String, Record<Author>> = self
            .repository
            .authors
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();

        Ok(books
            .into_iter()
            .map(|book| {
                let author = authors.get(&book.data.author).cloned();
                BookView::new(book, author, Vec::new())
            })
            .collect())
    }

    pub async fn populate_book_instance(&self, instance: Record<BookInstance>) -> AppResult<BookInstanceView> {
        self.populate_book_instances(vec![instance])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("populated copy went missing".to_string()))
    }

    /// Expand the book of every copy with a single batched read
    pub async fn populate_book_instances(
        &self,
        instances: Vec<Record<BookInstance>>,
    ) -> AppResult<Vec<BookInstanceView>> {
        let book_ids: Vec<String> = instances.iter().map(|i| i.data.book.clone()).collect();
        let books: HashMap<String, Record<Book>> = self
            .repository
            .books
            .find_by_ids(&book_ids)
            .await?
            .into_iter()
            .map(|b| (b.id.clone(), b))
            .collect();

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.get(&instance.data.book).cloned();
                BookInstanceView::new(instance, book)
            })
            .collect())
    }
}
