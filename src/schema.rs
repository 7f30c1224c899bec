//! Startup schema synchronization
//!
//! Tables are created when absent and extended with missing columns; nothing
//! is ever dropped or narrowed. A NOT NULL column added to a populated table
//! needs a declared default, otherwise the ALTER fails and startup stops.

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, Progress, User},
    naming::{NamingStrategy, PostgresNaming},
};

/// Column declaration using logical names
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
    /// Right-hand side of a CHECK on this column, e.g. `>= 0`
    pub check: Option<&'static str>,
    /// Backfill value used when the column is added to an existing table
    pub default: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
            unique: false,
            primary_key: false,
            check: None,
            default: None,
        }
    }

    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            sql_type: "SERIAL",
            nullable: false,
            unique: false,
            primary_key: true,
            check: None,
            default: None,
        }
    }

    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn check(mut self, condition: &'static str) -> Self {
        self.check = Some(condition);
        self
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }
}

/// Foreign key from a column to another entity's primary key
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyDef {
    pub relationship: &'static str,
    pub column: &'static str,
    /// Logical name of the referenced entity
    pub references: &'static str,
    pub referenced_column: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub foreign_keys: &'static [ForeignKeyDef],
}

/// A persisted record type
pub trait Entity {
    const SCHEMA: EntitySchema;
}

/// Entities in creation order (referenced tables first)
pub const ENTITIES: &[EntitySchema] = &[Book::SCHEMA, User::SCHEMA, Progress::SCHEMA];

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn column_sql(naming: &impl NamingStrategy, table: &str, column: &ColumnDef) -> String {
    let mut sql = format!(
        "{} {}",
        quote(&naming.column_name(table, column.name)),
        column.sql_type
    );
    if column.primary_key {
        sql.push_str(" PRIMARY KEY");
    } else if !column.nullable {
        sql.push_str(" NOT NULL");
    }
    sql
}

/// `CREATE TABLE IF NOT EXISTS` for an entity
pub fn create_table_sql(naming: &impl NamingStrategy, entity: &EntitySchema) -> String {
    let table = naming.table_name(entity.name);

    let mut parts: Vec<String> = entity
        .columns
        .iter()
        .map(|c| column_sql(naming, &table, c))
        .collect();

    for column in entity.columns.iter() {
        if let Some(condition) = column.check {
            let physical = naming.column_name(&table, column.name);
            parts.push(format!(
                "CONSTRAINT {} CHECK ({} {})",
                quote(&naming.check_name(&table, &physical)),
                quote(&physical),
                condition
            ));
        }
    }

    for fk in entity.foreign_keys {
        let referenced = naming.table_name(fk.references);
        parts.push(format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            quote(&naming.relationship_fk_name(fk.relationship)),
            quote(&naming.column_name(&table, fk.column)),
            quote(&referenced),
            quote(&naming.column_name(&referenced, fk.referenced_column)),
        ));
    }

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        quote(&table),
        parts.join(",\n    ")
    )
}

/// `ALTER TABLE ... ADD COLUMN IF NOT EXISTS` for every non-key column
pub fn add_column_sql(naming: &impl NamingStrategy, entity: &EntitySchema) -> Vec<String> {
    let table = naming.table_name(entity.name);
    entity
        .columns
        .iter()
        .filter(|c| !c.primary_key)
        .map(|c| {
            let mut sql = format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {}",
                quote(&table),
                column_sql(naming, &table, c)
            );
            if let Some(value) = c.default {
                sql.push_str(&format!(" DEFAULT {}", value));
            }
            sql
        })
        .collect()
}

/// Unique indexes for unique columns and plain indexes for foreign keys
pub fn index_sql(naming: &impl NamingStrategy, entity: &EntitySchema) -> Vec<String> {
    let table = naming.table_name(entity.name);
    let mut statements = Vec::new();

    for column in entity.columns.iter().filter(|c| c.unique) {
        let physical = naming.column_name(&table, column.name);
        statements.push(format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ({})",
            quote(&naming.unique_name(&table, &physical)),
            quote(&table),
            quote(&physical)
        ));
    }

    for fk in entity.foreign_keys {
        let physical = naming.column_name(&table, fk.column);
        statements.push(format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            quote(&naming.index_name(&table, &physical)),
            quote(&table),
            quote(&physical)
        ));
    }

    statements
}

/// All statements needed to bring the database in line with `ENTITIES`
pub fn statements(naming: &impl NamingStrategy) -> Vec<String> {
    ENTITIES
        .iter()
        .flat_map(|entity| {
            std::iter::once(create_table_sql(naming, entity))
                .chain(add_column_sql(naming, entity))
                .chain(index_sql(naming, entity))
        })
        .collect()
}

/// Create or extend all tables in a single transaction
pub async fn sync(pool: &Pool<Postgres>) -> AppResult<()> {
    let statements = statements(&PostgresNaming);
    let mut tx = pool.begin().await?;

    for sql in &statements {
        tracing::debug!("Schema sync: {}", sql);
        sqlx::query(sql).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    tracing::info!(tables = ENTITIES.len(), statements = statements.len(), "Schema synchronized");
    Ok(())
}
