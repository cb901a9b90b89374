//! Data models for the Local Library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{error::StoreResult, store::Document};

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookView};
pub use book_instance::{BookInstance, BookInstanceView, InstanceStatus};
pub use genre::Genre;

/// A catalog entity type persisted in its own collection
pub trait Entity: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    /// Collection name in the document store
    const COLLECTION: &'static str;
    /// Human-readable label, used in "<label> not found"
    const LABEL: &'static str;
    /// Path segment for detail pages: /catalog/{ROUTE}/{id}
    const ROUTE: &'static str;
    /// Path of the list page
    const LIST_URL: &'static str;
}

/// A persisted entity: store-assigned id plus the entity's fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Entity> Record<T> {
    pub fn from_document(doc: Document) -> StoreResult<Self> {
        Ok(Self {
            id: doc.id,
            data: serde_json::from_value(doc.body)?,
        })
    }

    /// Detail page URL
    pub fn url(&self) -> String {
        format!("/catalog/{}/{}", T::ROUTE, self.id)
    }
}

/// Display format for dates, e.g. "Oct 6, 2026"
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}
