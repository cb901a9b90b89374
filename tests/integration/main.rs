//! Integration tests against an in-memory store, through the router and the services

mod api_tests;
mod authors;
mod book_instances;
mod books;
mod genres;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use locallib_server::{
    api,
    store::{DocumentStore, Filter, MemoryStore},
    AppState,
};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Target of a 303 redirect
    pub fn location(&self) -> &str {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "expected a redirect, got {:?}", self.body);
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("redirect without location")
    }

    /// Id at the end of a redirect to a detail page
    pub fn created_id(&self) -> String {
        self.location()
            .rsplit('/')
            .next()
            .expect("empty location")
            .to_string()
    }

    /// Field names of the validation errors in a re-rendered form
    pub fn error_fields(&self) -> Vec<String> {
        self.body["errors"]
            .as_array()
            .expect("no errors in view")
            .iter()
            .map(|e| e["field"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone());
        Self {
            router: api::router(state),
            store,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, pairs: &[(&str, &str)]) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(pairs).unwrap()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn count(&self, collection: &str) -> u64 {
        self.store.count(collection, &Filter::All).await.unwrap()
    }

    pub async fn create_genre(&self, name: &str) -> String {
        self.post_form("/catalog/genre/create", &[("name", name)])
            .await
            .created_id()
    }

    pub async fn create_author(&self, first_name: &str, family_name: &str) -> String {
        self.post_form(
            "/catalog/author/create",
            &[("first_name", first_name), ("family_name", family_name)],
        )
        .await
        .created_id()
    }

    pub async fn create_book(&self, title: &str, author: &str, genres: &[&str]) -> String {
        let mut pairs = vec![
            ("title", title),
            ("author", author),
            ("summary", "A summary."),
            ("isbn", "9780441013593"),
        ];
        pairs.extend(genres.iter().map(|g| ("genre", *g)));
        self.post_form("/catalog/book/create", &pairs).await.created_id()
    }

    pub async fn create_copy(&self, book: &str, status: &str) -> String {
        self.post_form(
            "/catalog/bookinstance/create",
            &[("book", book), ("imprint", "Ace, 1990"), ("status", status)],
        )
        .await
        .created_id()
    }
}
