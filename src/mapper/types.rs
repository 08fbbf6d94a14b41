//! Mapper types and traits
//!
//! Defines the table mapper abstraction and the per-record report it yields.

use crate::error::Result;
use crate::gateway::{InsertGateway, InsertOutcome, Table};
use crate::record::RecordExtractor;
use crate::types::SqlParam;

/// Extraction and insert unit for one target table
pub trait TableMapper: Send + Sync {
    /// Target table
    fn table(&self) -> Table;

    /// Rows for one record, each in the table's column order
    ///
    /// An error means a structurally required field is missing; nothing is
    /// inserted for this table in that case.
    fn rows(&self, record: &RecordExtractor<'_>) -> Result<Vec<Vec<SqlParam>>>;

    /// Extract the rows and insert them one by one
    ///
    /// A failed row never prevents the next row from being attempted.
    fn apply(&self, record: &RecordExtractor<'_>, gateway: &dyn InsertGateway) -> MapperReport {
        let table = self.table();
        let mut report = MapperReport::new(table);
        let external_id = record.external_id().unwrap_or("<missing id>");

        let rows = match self.rows(record) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("{} extraction failed for {}: {}", table, external_id, e);
                report.extraction_error = Some(e.to_string());
                return report;
            }
        };

        let statement = table.insert_sql();
        for row in &rows {
            match gateway.insert(&statement, row) {
                InsertOutcome::Ok => {
                    tracing::debug!("Inserted {} row for {}", table, external_id);
                    report.inserted += 1;
                }
                InsertOutcome::DuplicateKey if table.is_singleton() => {
                    tracing::warn!("Duplicate key in {} for {}", table, external_id);
                    report.duplicates += 1;
                }
                InsertOutcome::DuplicateKey => {
                    // detail tables carry no unique key; only a hand-added constraint lands here
                    tracing::error!("Unexpected duplicate key in {} for {}", table, external_id);
                    report.duplicates += 1;
                }
                InsertOutcome::Failure(detail) => {
                    tracing::error!("Insert into {} failed for {}: {}", table, external_id, detail);
                    report.failures.push(detail);
                }
            }
        }

        report
    }
}

/// Outcome of one mapper over one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperReport {
    /// Target table
    pub table: Table,
    /// Rows persisted
    pub inserted: usize,
    /// Rows rejected as duplicate keys
    pub duplicates: usize,
    /// Details of rows that failed for any other reason
    pub failures: Vec<String>,
    /// Set when the record lacked a required field
    pub extraction_error: Option<String>,
}

impl MapperReport {
    /// Create an empty report
    pub fn new(table: Table) -> Self {
        Self {
            table,
            inserted: 0,
            duplicates: 0,
            failures: Vec::new(),
            extraction_error: None,
        }
    }

    /// Number of rows attempted against the gateway
    pub fn attempted(&self) -> usize {
        self.inserted + self.duplicates + self.failures.len()
    }
}
