//! Book queries

use super::EntityRepository;
use crate::{
    error::AppResult,
    models::{Book, Record},
    store::{Filter, Query, Sort},
};

impl EntityRepository<Book> {
    /// Book list: title and author only, sorted by title
    pub async fn list_titles_with_author(&self) -> AppResult<Vec<Record<Book>>> {
        self.find_all(
            &Query::default()
                .project(&["title", "author"])
                .sorted_by(Sort::asc("title")),
        )
        .await
    }

    /// Titles only, for choice lists
    pub async fn list_titles(&self) -> AppResult<Vec<Record<Book>>> {
        self.find_all(
            &Query::default()
                .project(&["title"])
                .sorted_by(Sort::asc("title")),
        )
        .await
    }

    /// Books written by an author
    pub async fn by_author(&self, author_id: &str) -> AppResult<Vec<Record<Book>>> {
        self.find_all(
            &Query::filter(Filter::eq("author", author_id))
                .project(&["title", "summary"])
                .sorted_by(Sort::asc("title")),
        )
        .await
    }

    /// Books carrying a genre
    pub async fn by_genre(&self, genre_id: &str) -> AppResult<Vec<Record<Book>>> {
        self.find_all(
            &Query::filter(Filter::contains("genre", genre_id))
                .project(&["title", "summary"])
                .sorted_by(Sort::asc("title")),
        )
        .await
    }
}
