//! Repository layer: one thin CRUD facade per entity type over the document store.
//!
//! No business rules live here. In particular nothing in this layer refuses a
//! delete because of dependents; that guard belongs to the services.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use std::marker::PhantomData;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, StoreError},
    models::{Author, Book, BookInstance, Entity, Genre, Record},
    store::{DocumentStore, Filter, Query},
};

/// Main repository struct holding the store handle and per-entity facades
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<dyn DocumentStore>,
    pub authors: EntityRepository<Author>,
    pub genres: EntityRepository<Genre>,
    pub books: EntityRepository<Book>,
    pub book_instances: EntityRepository<BookInstance>,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            authors: EntityRepository::new(store.clone()),
            genres: EntityRepository::new(store.clone()),
            books: EntityRepository::new(store.clone()),
            book_instances: EntityRepository::new(store.clone()),
            store,
        }
    }
}

/// CRUD over the collection of one entity type
pub struct EntityRepository<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

/// Ids are UUIDs; anything else is a storage-level failure, not a miss
fn check_id(id: &str) -> Result<(), StoreError> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| StoreError::MalformedId(id.to_string()))
}

impl<T: Entity> EntityRepository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Get by id; `Ok(None)` when absent, `Err` when the id is malformed
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Record<T>>> {
        check_id(id)?;
        match self.store.find_by_id(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(Record::from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Whether a reference resolves; malformed ids simply do not
    pub async fn exists(&self, id: &str) -> AppResult<bool> {
        if check_id(id).is_err() {
            return Ok(false);
        }
        Ok(self.store.find_by_id(T::COLLECTION, id).await?.is_some())
    }

    /// List with filter, projection and sort
    pub async fn find_all(&self, query: &Query) -> AppResult<Vec<Record<T>>> {
        let docs = self.store.find(T::COLLECTION, query).await?;
        docs.into_iter()
            .map(|doc| Record::from_document(doc).map_err(AppError::from))
            .collect()
    }

    /// Resolve a set of references; ids that do not resolve are skipped
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Record<T>>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_all(&Query::filter(Filter::IdIn(ids.to_vec())))
            .await
    }

    pub async fn count(&self, filter: &Filter) -> AppResult<u64> {
        Ok(self.store.count(T::COLLECTION, filter).await?)
    }

    /// Persist a new entity; the store assigns its id
    pub async fn save(&self, entity: &T) -> AppResult<Record<T>> {
        let body = serde_json::to_value(entity).map_err(StoreError::from)?;
        let doc = self.store.insert(T::COLLECTION, body).await?;
        Ok(Record::from_document(doc)?)
    }

    /// Replace every field of an existing entity, keeping its id
    pub async fn update_by_id(&self, id: &str, entity: &T) -> AppResult<Record<T>> {
        check_id(id)?;
        let body = serde_json::to_value(entity).map_err(StoreError::from)?;
        let doc = self
            .store
            .replace(T::COLLECTION, id, body)
            .await?
            .ok_or_else(|| AppError::not_found(T::LABEL))?;
        Ok(Record::from_document(doc)?)
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        check_id(id)?;
        if !self.store.delete(T::COLLECTION, id).await? {
            return Err(AppError::not_found(T::LABEL));
        }
        Ok(())
    }
}
