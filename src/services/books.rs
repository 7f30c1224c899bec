//! Book catalog service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::book::{Book, BookInput},
    repository::BookStore,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Get book by ID
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        match self.store.get_by_id(id).await {
            Ok(book) => {
                tracing::info!(book_id = id, "Book retrieved");
                Ok(book)
            }
            Err(e) => {
                tracing::warn!(book_id = id, error = %e, "Book lookup failed");
                Err(e)
            }
        }
    }

    /// Get book by ISBN (taken verbatim)
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        match self.store.get_by_isbn(isbn).await {
            Ok(book) => {
                tracing::info!(book_id = book.id, isbn, "Book retrieved by ISBN");
                Ok(book)
            }
            Err(e) => {
                tracing::warn!(isbn, error = %e, "Book lookup by ISBN failed");
                Err(e)
            }
        }
    }

    /// Create a book
    pub async fn create(&self, input: BookInput) -> AppResult<Book> {
        let input = input.normalized()?;
        let book = self.store.store(&input).await?;
        tracing::info!(book_id = book.id, isbn = %book.isbn, "Book created");
        Ok(book)
    }

    /// Replace all fields of the book identified by `id`
    pub async fn update(&self, id: i32, input: BookInput) -> AppResult<Book> {
        let book = input.normalized()?.into_book(id);
        let updated = self.store.update(&book).await?;
        tracing::info!(book_id = id, "Book updated");
        Ok(updated)
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let deleted = self.store.delete(id).await?;
        tracing::info!(book_id = id, title = %deleted.title, "Book deleted");
        Ok(())
    }
}
