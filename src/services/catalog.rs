//! Catalog home page

use crate::{
    error::AppResult,
    views::{IndexContext, Page},
};

use super::lookup::LookupService;

#[derive(Clone)]
pub struct CatalogService {
    lookup: LookupService,
}

impl CatalogService {
    pub fn new(lookup: LookupService) -> Self {
        Self { lookup }
    }

    /// Counts of every entity type
    pub async fn index(&self) -> AppResult<Page<IndexContext>> {
        let data = self.lookup.catalog_counts().await?;
        Ok(Page::render("index", "Local Library Home", IndexContext { data }))
    }
}
