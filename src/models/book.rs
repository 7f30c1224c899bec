//! Book model and request payload

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    schema::{ColumnDef, Entity, EntitySchema},
};

/// Width of the `isbn` column
pub const ISBN_MAX_LEN: usize = 20;

/// Width of the `title` and `author` columns
pub const TEXT_MAX_LEN: usize = 255;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Publication date (YYYY-MM-DD)
    #[schema(example = "1965-08-01")]
    pub publication_date: NaiveDate,
    /// ISBN, unique across the catalog
    pub isbn: String,
}

impl Entity for Book {
    const SCHEMA: EntitySchema = EntitySchema {
        name: "Books",
        columns: &[
            ColumnDef::primary_key("ID"),
            ColumnDef::new("Title", "VARCHAR(255)").not_null().default_value("''"),
            ColumnDef::new("Author", "VARCHAR(255)").not_null().default_value("''"),
            ColumnDef::new("Publication_Date", "DATE").not_null(),
            ColumnDef::new("ISBN", "VARCHAR(20)").not_null().unique(),
        ],
        foreign_keys: &[],
    };
}

/// Create/update book request. An `id` in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    #[schema(example = "1965-08-01")]
    pub publication_date: NaiveDate,
    pub isbn: String,
}

impl BookInput {
    /// Trim text fields and check they are usable
    pub fn normalized(self) -> AppResult<Self> {
        let input = Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            publication_date: self.publication_date,
            isbn: self.isbn.trim().to_string(),
        };

        if input.title.is_empty() {
            return Err(AppError::Validation("Book title cannot be empty".to_string()));
        }
        if input.author.is_empty() {
            return Err(AppError::Validation("Book author cannot be empty".to_string()));
        }
        if input.title.chars().count() > TEXT_MAX_LEN {
            return Err(AppError::Validation(format!(
                "Book title cannot exceed {} characters",
                TEXT_MAX_LEN
            )));
        }
        if input.author.chars().count() > TEXT_MAX_LEN {
            return Err(AppError::Validation(format!(
                "Book author cannot exceed {} characters",
                TEXT_MAX_LEN
            )));
        }
        if input.isbn.is_empty() {
            return Err(AppError::Validation("Book ISBN cannot be empty".to_string()));
        }
        if input.isbn.chars().count() > ISBN_MAX_LEN {
            return Err(AppError::Validation(format!(
                "Book ISBN cannot exceed {} characters",
                ISBN_MAX_LEN
            )));
        }

        Ok(input)
    }

    /// Full record for the given id
    pub fn into_book(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            publication_date: self.publication_date,
            isbn: self.isbn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> BookInput {
        serde_json::from_str(
            r#"{"title":"Dune","author":"Frank Herbert","publication_date":"1965-08-01","isbn":"9780441013593"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_body_id_is_ignored() {
        let input: BookInput = serde_json::from_str(
            r#"{"id":42,"title":"Dune","author":"Frank Herbert","publication_date":"1965-08-01","isbn":"9780441013593"}"#,
        )
        .unwrap();
        assert_eq!(input, dune());
        assert_eq!(input.into_book(7).id, 7);
    }

    #[test]
    fn test_normalized_trims() {
        let mut input = dune();
        input.title = "  Dune ".to_string();
        let input = input.normalized().unwrap();
        assert_eq!(input.title, "Dune");
    }

    #[test]
    fn test_normalized_rejects_blank_fields() {
        let mut input = dune();
        input.author = "   ".to_string();
        assert!(matches!(input.normalized(), Err(AppError::Validation(_))));

        let mut input = dune();
        input.isbn = String::new();
        assert!(matches!(input.normalized(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_normalized_rejects_long_isbn() {
        let mut input = dune();
        input.isbn = "9".repeat(ISBN_MAX_LEN + 1);
        assert!(matches!(input.normalized(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_normalized_rejects_long_title_and_author() {
        let mut input = dune();
        input.title = "x".repeat(300);
        assert!(matches!(input.normalized(), Err(AppError::Validation(_))));

        let mut input = dune();
        input.author = "é".repeat(TEXT_MAX_LEN + 1);
        assert!(matches!(input.normalized(), Err(AppError::Validation(_))));

        // exactly at the column width is accepted
        let mut input = dune();
        input.title = "é".repeat(TEXT_MAX_LEN);
        assert!(input.normalized().is_ok());
    }

    #[test]
    fn test_book_serializes_date() {
        let book = dune().into_book(1);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["publication_date"], "1965-08-01");
        assert_eq!(json["id"], 1);
    }
}
