//! Target table definitions

use serde::{Deserialize, Serialize};

/// One of the five target tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Table {
    /// First call number per record
    CallNumbers,
    /// First contributor per record
    Contributors,
    /// Item metadata, one row per record
    Items,
    /// One row per image/pdf resource
    Resources,
    /// One row per subject
    Subjects,
}

impl Table {
    /// All tables, in per-record write order
    pub const ALL: [Table; 5] = [
        Table::CallNumbers,
        Table::Contributors,
        Table::Items,
        Table::Resources,
        Table::Subjects,
    ];

    /// Table name as created in the database
    pub fn name(&self) -> &'static str {
        match self {
            Table::CallNumbers => "CallNumbers",
            Table::Contributors => "Contributors",
            Table::Items => "Items",
            Table::Resources => "Resources",
            Table::Subjects => "Subjects",
        }
    }

    /// Column names in insert parameter order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::CallNumbers => &["external_id", "call_number"],
            Table::Contributors => &["external_id", "contributor"],
            Table::Items => &[
                "call_number",
                "created_published",
                "date",
                "notes",
                "source_collection",
                "title",
                "external_id",
            ],
            Table::Resources => &["external_id", "image", "pdf"],
            Table::Subjects => &["external_id", "subject"],
        }
    }

    /// Whether `external_id` is unique, making re-ingestion a no-op
    pub fn is_singleton(&self) -> bool {
        matches!(
            self,
            Table::CallNumbers | Table::Contributors | Table::Items
        )
    }

    /// Parameterized insert statement, one `?` per column
    pub fn insert_sql(&self) -> String {
        let columns = self.columns();
        let names = columns
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!("INSERT INTO {} ({names}) VALUES ({placeholders})", self.name())
    }

    /// `CREATE TABLE IF NOT EXISTS` statement
    pub fn create_sql(&self) -> &'static str {
        match self {
            Table::CallNumbers => {
                r#"CREATE TABLE IF NOT EXISTS CallNumbers (
                    "external_id" VARCHAR NOT NULL UNIQUE,
                    "call_number" VARCHAR NOT NULL
                )"#
            }
            Table::Contributors => {
                r#"CREATE TABLE IF NOT EXISTS Contributors (
                    "external_id" VARCHAR NOT NULL UNIQUE,
                    "contributor" VARCHAR NOT NULL
                )"#
            }
            Table::Items => {
                r#"CREATE TABLE IF NOT EXISTS Items (
                    "call_number" VARCHAR NOT NULL,
                    "created_published" VARCHAR,
                    "date" VARCHAR,
                    "notes" VARCHAR,
                    "source_collection" VARCHAR,
                    "title" VARCHAR NOT NULL,
                    "external_id" VARCHAR NOT NULL UNIQUE
                )"#
            }
            Table::Resources => {
                r#"CREATE TABLE IF NOT EXISTS Resources (
                    "external_id" VARCHAR NOT NULL,
                    "image" VARCHAR,
                    "pdf" VARCHAR
                )"#
            }
            Table::Subjects => {
                r#"CREATE TABLE IF NOT EXISTS Subjects (
                    "external_id" VARCHAR NOT NULL,
                    "subject" VARCHAR NOT NULL
                )"#
            }
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
