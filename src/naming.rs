//! Physical identifier naming for PostgreSQL
//!
//! Entities are declared with logical names (`Books`, `PublicationDate`);
//! the strategy turns them into the lowercase, singular identifiers used by
//! schema synchronization and queries.

/// Maps logical names to database identifiers
pub trait NamingStrategy {
    fn table_name(&self, table: &str) -> String;
    fn schema_name(&self, schema: &str) -> String;
    fn column_name(&self, table: &str, column: &str) -> String;
    fn join_table_name(&self, join_table: &str) -> String;
    fn relationship_fk_name(&self, relationship: &str) -> String;
    fn check_name(&self, table: &str, column: &str) -> String;
    fn index_name(&self, table: &str, column: &str) -> String;
    fn unique_name(&self, table: &str, column: &str) -> String;
}

/// Lowercase, singular table names; everything else lowercased verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresNaming;

impl NamingStrategy for PostgresNaming {
    fn table_name(&self, table: &str) -> String {
        singular(table).to_lowercase()
    }

    fn schema_name(&self, schema: &str) -> String {
        schema.to_lowercase()
    }

    fn column_name(&self, _table: &str, column: &str) -> String {
        column.to_lowercase()
    }

    fn join_table_name(&self, join_table: &str) -> String {
        singular(join_table).to_lowercase()
    }

    fn relationship_fk_name(&self, relationship: &str) -> String {
        relationship.to_lowercase()
    }

    fn check_name(&self, table: &str, column: &str) -> String {
        format!("chk_{}_{}", table, column).to_lowercase()
    }

    fn index_name(&self, table: &str, column: &str) -> String {
        format!("idx_{}_{}", table, column).to_lowercase()
    }

    fn unique_name(&self, table: &str, column: &str) -> String {
        format!("uq_{}_{}", table, column).to_lowercase()
    }
}

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
    "progress",
    "metadata",
];

// (plural, singular)
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("statuses", "status"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("data", "datum"),
    ("criteria", "criterion"),
];

// Checked in order; first matching suffix wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ies", "y"),
    ("xes", "x"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("zzes", "zz"),
    ("oes", "o"),
    ("ives", "ife"),
    ("lves", "lf"),
    ("ves", "f"),
];

/// Singular form of an English noun, lowercased.
///
/// Words already singular are returned unchanged (modulo case).
pub fn singular(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.is_empty() {
        return lower;
    }

    if UNCOUNTABLE.iter().any(|u| lower.ends_with(u)) {
        return lower;
    }

    for (plural, single) in IRREGULAR {
        if lower == *plural {
            return (*single).to_string();
        }
        if let Some(prefix) = lower.strip_suffix(plural) {
            // compound names such as `salespeople`
            if prefix.ends_with('_') || prefix.len() > 2 {
                return format!("{}{}", prefix, single);
            }
        }
    }

    for (suffix, replacement) in SUFFIX_RULES {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if !stem.is_empty() {
                return format!("{}{}", stem, replacement);
            }
        }
    }

    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return lower;
    }

    match lower.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => lower,
    }
}
