//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Book catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        health::health_check,
        books::get_book,
        books::get_book_by_isbn,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookInput,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_book_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/books/{id}"));
        assert!(doc.paths.paths.contains_key("/books/isbn/{isbn}"));
        assert!(doc.paths.paths.contains_key("/books"));
    }
}
