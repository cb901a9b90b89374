//! Genre queries

use super::EntityRepository;
use crate::{
    error::AppResult,
    models::{Genre, Record},
    store::{Filter, Query, Sort},
};

impl EntityRepository<Genre> {
    /// All genres, sorted by name
    pub async fn list_sorted(&self) -> AppResult<Vec<Record<Genre>>> {
        self.find_all(&Query::default().sorted_by(Sort::asc("name")))
            .await
    }

    /// Exact (case-sensitive) name lookup
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Record<Genre>>> {
        let mut found = self.find_all(&Query::filter(Filter::eq("name", name))).await?;
        Ok(if found.is_empty() {
            None
        } else {
            Some(found.swap_remove(0))
        })
    }
}
