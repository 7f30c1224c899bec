//! Repository layer for database operations

pub mod books;

use sqlx::{Pool, Postgres};

pub use books::{BookStore, BooksRepository};

#[cfg(test)]
pub use books::MockBookStore;

/// Main repository struct, one member per entity
#[derive(Clone)]
pub struct Repository {
    pub books: BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: BooksRepository::new(pool),
        }
    }
}
