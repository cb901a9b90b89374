//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, catalog, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library API",
        version = "0.1.0",
        description = "Catalog of authors, genres, books and book copies. \
            Pages are returned as JSON view models; successful writes answer 303.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::index,
        // Books
        books::list,
        books::detail,
        books::create_form,
        books::create,
        books::update_form,
        books::update,
        books::delete_form,
        books::delete,
        // Authors
        authors::list,
        authors::detail,
        authors::create_form,
        authors::create,
        authors::update_form,
        authors::update,
        authors::delete_form,
        authors::delete,
        // Genres
        genres::list,
        genres::detail,
        genres::create_form,
        genres::create,
        genres::update_form,
        genres::update,
        genres::delete_form,
        genres::delete,
        // Copies
        book_instances::list,
        book_instances::detail,
        book_instances::create_form,
        book_instances::create,
        book_instances::update_form,
        book_instances::update,
        book_instances::delete_form,
        book_instances::delete,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::validation::FieldError,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog home"),
        (name = "books", description = "Book management"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "bookinstances", description = "Book copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
