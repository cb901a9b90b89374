//! Book instance (physical copy) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_date, Book, Entity, Record};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    pub const ALL: [InstanceStatus; 4] = [
        InstanceStatus::Available,
        InstanceStatus::Maintenance,
        InstanceStatus::Loaned,
        InstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Copy document; `book` holds the id of the book it is a copy of
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookInstance {
    pub book: String,
    pub imprint: String,
    pub status: InstanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_back: Option<NaiveDate>,
}

impl Entity for BookInstance {
    const COLLECTION: &'static str = "bookinstances";
    const LABEL: &'static str = "Book copy";
    const ROUTE: &'static str = "bookinstance";
    const LIST_URL: &'static str = "/catalog/bookinstances";
}

/// Copy with its book resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstanceView {
    pub id: String,
    pub url: String,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
    pub due_back_formatted: String,
    /// `None` when the book reference no longer resolves
    pub book: Option<Record<Book>>,
}

impl BookInstanceView {
    pub fn new(instance: Record<BookInstance>, book: Option<Record<Book>>) -> Self {
        Self {
            url: instance.url(),
            id: instance.id,
            imprint: instance.data.imprint,
            status: instance.data.status,
            due_back_formatted: format_date(instance.data.due_back),
            due_back: instance.data.due_back,
            book,
        }
    }

    pub fn book_title(&self) -> &str {
        self.book.as_ref().map(|b| b.data.title.as_str()).unwrap_or_default()
    }
}
