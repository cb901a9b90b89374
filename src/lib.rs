//! Local Library catalog server
//!
//! Authors, genres, books and book copies, with form validation, guarded
//! deletes and concurrent lookups, served over HTTP as JSON view models.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;
use store::DocumentStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Wire repository and services over an opened store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let repository = Repository::new(store.clone());
        Self {
            services: Arc::new(Services::new(repository)),
            store,
        }
    }
}
