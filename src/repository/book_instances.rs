//! Book instance queries

use super::EntityRepository;
use crate::{
    error::AppResult,
    models::{BookInstance, InstanceStatus, Record},
    store::{Filter, Query},
};

impl EntityRepository<BookInstance> {
    /// Copies of a book
    pub async fn of_book(&self, book_id: &str) -> AppResult<Vec<Record<BookInstance>>> {
        self.find_all(&Query::filter(Filter::eq("book", book_id)))
            .await
    }

    pub async fn count_available(&self) -> AppResult<u64> {
        self.count(&Filter::eq("status", InstanceStatus::Available.as_str()))
            .await
    }
}
