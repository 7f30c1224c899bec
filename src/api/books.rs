//! Book endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput},
    AppState,
};

/// Resolve the `{id}` path segment to a book id
fn book_id(path: Result<Path<u32>, PathRejection>) -> AppResult<i32> {
    let Path(id) = path.map_err(|rejection| {
        tracing::warn!("Invalid book id: {}", rejection.body_text());
        AppError::BadRequest(format!("Invalid book id: {}", rejection.body_text()))
    })?;

    // Ids beyond the column range cannot exist
    i32::try_from(id).map_err(|_| AppError::NotFound(format!("Book {} not found", id)))
}

fn book_body(body: Result<Json<BookInput>, JsonRejection>) -> AppResult<BookInput> {
    match body {
        Ok(Json(input)) => Ok(input),
        Err(JsonRejection::JsonDataError(e)) => {
            tracing::warn!("Invalid book payload: {}", e.body_text());
            Err(AppError::Validation(e.body_text()))
        }
        Err(rejection) => {
            tracing::warn!("Unreadable book payload: {}", rejection.body_text());
            Err(AppError::BadRequest(rejection.body_text()))
        }
    }
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = u32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Invalid ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<u32>, PathRejection>,
) -> AppResult<Json<Book>> {
    let id = book_id(path)?;
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Get book by ISBN
#[utoipa::path(
    get,
    path = "/books/isbn/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "ISBN, matched verbatim")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_isbn(&isbn).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already exists", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid book", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let input = book_body(body)?;
    let created = state.services.books.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a book; the ID comes from the path, never the body
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = u32, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<u32>, PathRejection>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> AppResult<Json<Book>> {
    let id = book_id(path)?;
    let input = book_body(body)?;
    let updated = state.services.books.update(id, input).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = u32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<u32>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = book_id(path)?;
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
