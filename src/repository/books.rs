//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput},
    naming::{NamingStrategy, PostgresNaming},
    schema::Entity,
};

const BOOK_COLUMNS: &str = "id, title, author, publication_date, isbn";

/// Single-row persistence operations on books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new book and return it with its assigned id
    async fn store(&self, book: &BookInput) -> AppResult<Book>;

    /// Get book by primary key
    async fn get_by_id(&self, id: i32) -> AppResult<Book>;

    /// Get book by ISBN
    async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book>;

    /// Overwrite every field of an existing book
    async fn update(&self, book: &Book) -> AppResult<Book>;

    /// Delete a book, returning the removed record
    async fn delete(&self, id: i32) -> AppResult<Book>;
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
    table: String,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            table: books_table(),
        }
    }
}

/// Quoted physical name of the book table
fn books_table() -> String {
    format!("\"{}\"", PostgresNaming.table_name(Book::SCHEMA.name))
}

fn duplicate_isbn(isbn: &str) -> String {
    format!("A book with ISBN {} already exists", isbn)
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn store(&self, book: &BookInput) -> AppResult<Book> {
        let sql = format!(
            "INSERT INTO {} (title, author, publication_date, isbn) VALUES ($1, $2, $3, $4) RETURNING {}",
            self.table, BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.publication_date)
            .bind(&book.isbn)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(isbn = %book.isbn, error = %e, "Failed to store book");
                AppError::from_write(e, || duplicate_isbn(&book.isbn))
            })
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", BOOK_COLUMNS, self.table);
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(book_id = id, error = %e, "Failed to retrieve book");
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        let sql = format!(
            "SELECT {} FROM {} WHERE isbn = $1 LIMIT 1",
            BOOK_COLUMNS, self.table
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(isbn, error = %e, "Failed to retrieve book by ISBN");
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))
    }

    async fn update(&self, book: &Book) -> AppResult<Book> {
        let sql = format!(
            "UPDATE {} SET title = $1, author = $2, publication_date = $3, isbn = $4 WHERE id = $5 RETURNING {}",
            self.table, BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.publication_date)
            .bind(&book.isbn)
            .bind(book.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(book_id = book.id, error = %e, "Failed to update book");
                AppError::from_write(e, || duplicate_isbn(&book.isbn))
            })?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book.id)))
    }

    async fn delete(&self, id: i32) -> AppResult<Book> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING {}", self.table, BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(book_id = id, error = %e, "Failed to delete book");
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }
}
