//! HTTP surface of the catalog

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header, HeaderValue},
    response::Redirect,
    routing::get,
    Form, Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{error::AppError, validation::Submission, AppState};

/// Url-encoded form body; repeated keys are kept as lists
pub struct FormSubmission(pub Submission);

#[async_trait]
impl<S> FromRequest<S> for FormSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(FormSubmission(Submission::from_pairs(pairs)))
    }
}

/// Build the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Books
        .route("/books", get(books::list))
        .route("/book/create", get(books::create_form).post(books::create))
        .route("/book/:id", get(books::detail))
        .route("/book/:id/update", get(books::update_form).post(books::update))
        .route("/book/:id/delete", get(books::delete_form).post(books::delete))
        // Authors
        .route("/authors", get(authors::list))
        .route("/author/create", get(authors::create_form).post(authors::create))
        .route("/author/:id", get(authors::detail))
        .route("/author/:id/update", get(authors::update_form).post(authors::update))
        .route("/author/:id/delete", get(authors::delete_form).post(authors::delete))
        // Genres
        .route("/genres", get(genres::list))
        .route("/genre/create", get(genres::create_form).post(genres::create))
        .route("/genre/:id", get(genres::detail))
        .route("/genre/:id/update", get(genres::update_form).post(genres::update))
        .route("/genre/:id/delete", get(genres::delete_form).post(genres::delete))
        // Copies
        .route("/bookinstances", get(book_instances::list))
        .route(
            "/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/bookinstance/:id", get(book_instances::detail))
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_form).post(book_instances::update),
        )
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        );

    let app = Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .fallback(|| async { AppError::NotFound("Page not found".to_string()) })
        .with_state(state);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ));

    app.merge(openapi::create_openapi_router()).layer(middleware)
}
