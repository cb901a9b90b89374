//! In-process document store, used for development and tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{apply_projection, new_id, Document, DocumentStore, Filter, Query};
use crate::error::{StoreError, StoreResult};

/// Collections kept in insertion order
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.check_open()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn find(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>> {
        self.check_open()?;
        let collections = self.collections.read().await;
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| query.filter.matches(d))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(collections);

        if let Some(ref sort) = query.sort {
            // stable, so ties keep insertion order
            docs.sort_by(|a, b| sort.compare(a, b));
        }

        Ok(docs
            .into_iter()
            .map(|d| Document {
                body: apply_projection(d.body, query.projection.as_deref()),
                id: d.id,
            })
            .collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        self.check_open()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0))
    }

    async fn insert(&self, collection: &str, body: Value) -> StoreResult<Document> {
        self.check_open()?;
        let doc = Document { id: new_id(), body };
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn replace(&self, collection: &str, id: &str, body: Value) -> StoreResult<Option<Document>> {
        self.check_open()?;
        let mut collections = self.collections.write().await;
        let found = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id));
        Ok(found.map(|doc| {
            doc.body = body;
            doc.clone()
        }))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        self.check_open()?;
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
