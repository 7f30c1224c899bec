//! User model (schema only, no endpoints)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::schema::{ColumnDef, Entity, EntitySchema};

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Stored as given; never returned in responses
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
}

impl Entity for User {
    const SCHEMA: EntitySchema = EntitySchema {
        name: "Users",
        columns: &[
            ColumnDef::primary_key("ID"),
            ColumnDef::new("Email", "VARCHAR(255)").not_null().unique(),
            ColumnDef::new("Password", "VARCHAR(255)").not_null(),
            ColumnDef::new("Name", "VARCHAR(255)").not_null().default_value("''"),
        ],
        foreign_keys: &[],
    };
}
