//! Document store client.
//!
//! Every entity type lives in its own collection of JSON documents. The store
//! knows nothing about entities or their relationships: it stores, filters,
//! sorts and deletes documents, and never refuses a write on business grounds.

pub mod memory;
pub mod postgres;

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    config::DatabaseConfig,
    error::{StoreError, StoreResult},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A stored document: opaque id plus JSON body (the id is not part of the body)
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

/// Document selection
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    /// Top-level field equals the value
    Eq(String, Value),
    /// Top-level array field contains the value (or the scalar field equals it)
    Contains(String, Value),
    /// Document id is one of the given ids
    IdIn(Vec<String>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn contains(field: &str, value: impl Into<Value>) -> Self {
        Filter::Contains(field.to_string(), value.into())
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, value) => doc.body.get(field) == Some(value),
            Filter::Contains(field, value) => match doc.body.get(field) {
                Some(Value::Array(items)) => items.contains(value),
                Some(other) => other == value,
                None => false,
            },
            Filter::IdIn(ids) => ids.iter().any(|id| *id == doc.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: Direction::Desc,
        }
    }

    /// Compare two documents on the sort field; missing/null sorts first
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ord = compare_values(a.body.get(&self.field), b.body.get(&self.field));
        match self.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

/// Read query: filter, optional projection and optional sort
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filter: Filter,
    /// Top-level fields to keep; `None` keeps the whole body
    pub projection: Option<Vec<String>>,
    pub sort: Option<Sort>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            filter: Filter::All,
            projection: None,
            sort: None,
        }
    }
}

impl Query {
    pub fn filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn project(mut self, fields: &[&str]) -> Self {
        self.projection = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
}

/// Keep only the projected top-level fields of a document body
pub fn apply_projection(body: Value, projection: Option<&[String]>) -> Value {
    match (projection, body) {
        (Some(fields), Value::Object(map)) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .filter(|(key, _)| fields.iter().any(|f| f == key))
                .collect();
            Value::Object(kept)
        }
        (_, body) => body,
    }
}

/// Raw document-store operations shared by all backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document by id
    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Fetch every document matching the query
    async fn find(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>>;

    /// Count documents matching the filter
    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64>;

    /// Insert a new document and assign it a fresh id
    async fn insert(&self, collection: &str, body: Value) -> StoreResult<Document>;

    /// Replace the body of an existing document, keeping its id
    async fn replace(&self, collection: &str, id: &str, body: Value) -> StoreResult<Option<Document>>;

    /// Physically remove a document; returns whether one was removed
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Connectivity check
    async fn ping(&self) -> StoreResult<()>;

    /// Release connections; later calls fail with `StoreError::Unavailable`
    async fn close(&self);
}

/// Generate a new document id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Connect to the store named by the configured URL
pub async fn connect(config: &DatabaseConfig) -> StoreResult<Arc<dyn DocumentStore>> {
    if config.url.starts_with("memory:") {
        tracing::info!("Using in-memory document store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    if config.url.starts_with("postgres:") || config.url.starts_with("postgresql:") {
        let store = PgStore::connect(config).await?;
        tracing::info!("Connected to PostgreSQL document store");
        return Ok(Arc::new(store));
    }
    Err(StoreError::Unavailable(format!(
        "Unsupported database url scheme: {}",
        config.url.split(':').next().unwrap_or_default()
    )))
}
