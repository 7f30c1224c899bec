//! Reading progress model (schema only, no endpoints)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::schema::{ColumnDef, Entity, EntitySchema, ForeignKeyDef};

/// How far a user got in a book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Progress {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub page_number: i32,
    pub completion_status: bool,
}

impl Entity for Progress {
    const SCHEMA: EntitySchema = EntitySchema {
        name: "Progresses",
        columns: &[
            ColumnDef::primary_key("ID"),
            ColumnDef::new("User_ID", "INTEGER").not_null(),
            ColumnDef::new("Book_ID", "INTEGER").not_null(),
            ColumnDef::new("Page_Number", "INTEGER")
                .not_null()
                .check(">= 0")
                .default_value("0"),
            ColumnDef::new("Completion_Status", "BOOLEAN").not_null().default_value("FALSE"),
        ],
        foreign_keys: &[
            ForeignKeyDef {
                relationship: "FK_Progress_User",
                column: "User_ID",
                references: "Users",
                referenced_column: "ID",
            },
            ForeignKeyDef {
                relationship: "FK_Progress_Book",
                column: "Book_ID",
                references: "Books",
                referenced_column: "ID",
            },
        ],
    };
}
