//! Page models produced by the catalog services.
//!
//! Template rendering happens outside this server: a rendered page is the
//! view context serialized as JSON together with the template name.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use crate::{
    models::{
        author::AuthorView, Author, Book, BookInstance, BookInstanceView, BookView, Genre,
        InstanceStatus, Record,
    },
    validation::FieldError,
};

/// Outcome of a workflow step: render a view or redirect elsewhere
#[derive(Debug, Clone, PartialEq)]
pub enum Page<C> {
    Render(View<C>),
    Redirect(String),
}

impl<C> Page<C> {
    pub fn render(template: &'static str, title: impl Into<String>, context: C) -> Self {
        Page::Render(View {
            template,
            title: title.into(),
            context,
        })
    }

    pub fn redirect(url: impl Into<String>) -> Self {
        Page::Redirect(url.into())
    }

    pub fn view(&self) -> Option<&View<C>> {
        match self {
            Page::Render(view) => Some(view),
            Page::Redirect(_) => None,
        }
    }

    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Page::Render(_) => None,
            Page::Redirect(url) => Some(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View<C> {
    pub template: &'static str,
    pub title: String,
    #[serde(flatten)]
    pub context: C,
}

impl<C: Serialize> IntoResponse for Page<C> {
    fn into_response(self) -> Response {
        match self {
            Page::Render(view) => (StatusCode::OK, Json(view)).into_response(),
            Page::Redirect(url) => Redirect::to(&url).into_response(),
        }
    }
}

/// One option of a select / checkbox list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

impl Choice {
    pub fn new(id: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            selected,
        }
    }
}

pub fn author_choices(authors: &[Record<Author>], selected: &str) -> Vec<Choice> {
    authors
        .iter()
        .map(|a| Choice::new(a.id.clone(), a.data.name(), a.id == selected))
        .collect()
}

pub fn genre_choices(genres: &[Record<Genre>], checked: &[String]) -> Vec<Choice> {
    genres
        .iter()
        .map(|g| Choice::new(g.id.clone(), g.data.name.clone(), checked.contains(&g.id)))
        .collect()
}

pub fn book_choices(books: &[Record<Book>], selected: &str) -> Vec<Choice> {
    books
        .iter()
        .map(|b| Choice::new(b.id.clone(), b.data.title.clone(), b.id == selected))
        .collect()
}

pub fn status_choices(selected: Option<InstanceStatus>) -> Vec<Choice> {
    InstanceStatus::ALL
        .iter()
        .map(|s| Choice::new(s.as_str(), s.as_str(), Some(*s) == selected))
        .collect()
}

// ---------------------------------------------------------------------------
// Catalog index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub book_count: u64,
    pub book_instance_count: u64,
    pub book_instance_available_count: u64,
    pub author_count: u64,
    pub genre_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexContext {
    pub data: CatalogCounts,
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorListContext {
    pub author_list: Vec<AuthorView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorDetailContext {
    pub author: AuthorView,
    pub author_books: Vec<Record<Book>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorFormContext {
    /// Set when editing an existing author
    pub id: Option<String>,
    pub author: Option<Author>,
    pub errors: Vec<FieldError>,
}

/// Shared by delete confirmation and the blocked-delete guard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorDeleteContext {
    pub author: AuthorView,
    pub author_books: Vec<Record<Book>>,
}

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreListContext {
    pub genre_list: Vec<Record<Genre>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreDetailContext {
    pub genre: Record<Genre>,
    pub genre_books: Vec<Record<Book>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreFormContext {
    pub id: Option<String>,
    pub genre: Option<Genre>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreDeleteContext {
    pub genre: Record<Genre>,
    pub genre_books: Vec<Record<Book>>,
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookListContext {
    pub book_list: Vec<BookView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDetailContext {
    pub book: BookView,
    pub book_instances: Vec<Record<BookInstance>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookFormContext {
    pub id: Option<String>,
    pub book: Option<Book>,
    /// Stored book with author and genres resolved, on update only
    pub current: Option<BookView>,
    pub authors: Vec<Choice>,
    pub genres: Vec<Choice>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDeleteContext {
    pub book: Record<Book>,
    pub bookinstances_list: Vec<Record<BookInstance>>,
}

// ---------------------------------------------------------------------------
// Book instances
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstanceListContext {
    pub bookinstance_list: Vec<BookInstanceView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstanceDetailContext {
    pub bookinstance: BookInstanceView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstanceFormContext {
    pub id: Option<String>,
    pub bookinstance: Option<BookInstance>,
    /// Stored copy with its book resolved, on update only
    pub current: Option<BookInstanceView>,
    pub book_list: Vec<Choice>,
    pub statuses: Vec<Choice>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstanceDeleteContext {
    pub bookinstance: BookInstanceView,
}
