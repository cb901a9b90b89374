//! Book model and its populated (display) form

use serde::{Deserialize, Serialize};

use super::{Author, Entity, Genre, Record};

/// Book document. `author` and `genre` hold ids; they are expanded at read
/// time into [`BookView`], never denormalized into the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl Entity for Book {
    const COLLECTION: &'static str = "books";
    const LABEL: &'static str = "Book";
    const ROUTE: &'static str = "book";
    const LIST_URL: &'static str = "/catalog/books";
}

/// Book with its author and genres resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookView {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    /// `None` when the author reference no longer resolves
    pub author: Option<Record<Author>>,
    pub author_name: String,
    pub genre: Vec<Record<Genre>>,
}

impl BookView {
    pub fn new(book: Record<Book>, author: Option<Record<Author>>, genre: Vec<Record<Genre>>) -> Self {
        Self {
            url: book.url(),
            author_name: author.as_ref().map(|a| a.data.name()).unwrap_or_default(),
            id: book.id,
            title: book.data.title,
            summary: book.data.summary,
            isbn: book.data.isbn,
            author,
            genre,
        }
    }
}
