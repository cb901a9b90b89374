//! Author queries

use super::EntityRepository;
use crate::{
    error::AppResult,
    models::{Author, Record},
    store::{Query, Sort},
};

impl EntityRepository<Author> {
    /// All authors, sorted by family name
    pub async fn list_sorted(&self) -> AppResult<Vec<Record<Author>>> {
        self.find_all(&Query::default().sorted_by(Sort::asc("family_name")))
            .await
    }
}
