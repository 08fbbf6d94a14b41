//! Engine types
//!
//! Run statistics for the ingestion engine.

use crate::gateway::Table;
use crate::mapper::MapperReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-table counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    /// Rows persisted
    pub inserted: usize,
    /// Rows rejected as duplicate keys
    pub duplicates: usize,
    /// Rows that failed for any other reason
    pub failed: usize,
    /// Records missing a field this table requires
    pub extraction_failures: usize,
}

/// Statistics from an ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestStats {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Objects returned by the listing
    pub objects_listed: usize,
    /// Objects downloaded, parsed and mapped
    pub objects_processed: usize,
    /// Objects skipped under the skip policy
    pub objects_skipped: usize,
    /// Identifiers of the skipped objects
    pub skipped_objects: Vec<String>,
    /// Records run through the mapper pipeline
    pub records_processed: usize,
    /// Counters per target table
    pub tables: BTreeMap<Table, TableStats>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl Default for IngestStats {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestStats {
    /// Create new stats stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            objects_listed: 0,
            objects_processed: 0,
            objects_skipped: 0,
            skipped_objects: Vec::new(),
            records_processed: 0,
            tables: BTreeMap::new(),
            duration_ms: 0,
        }
    }

    /// Record one skipped object
    pub fn skip_object(&mut self, object: impl Into<String>) {
        self.objects_skipped += 1;
        self.skipped_objects.push(object.into());
    }

    /// Fold one mapper report into the table counters
    pub fn add_report(&mut self, report: &MapperReport) {
        let stats = self.tables.entry(report.table).or_default();
        stats.inserted += report.inserted;
        stats.duplicates += report.duplicates;
        stats.failed += report.failures.len();
        if report.extraction_error.is_some() {
            stats.extraction_failures += 1;
        }
    }

    /// Counters for one table
    pub fn table(&self, table: Table) -> TableStats {
        self.tables.get(&table).copied().unwrap_or_default()
    }

    /// Total rows persisted across all tables
    pub fn total_inserted(&self) -> usize {
        self.tables.values().map(|t| t.inserted).sum()
    }

    /// Total failed inserts across all tables
    pub fn total_failed(&self) -> usize {
        self.tables.values().map(|t| t.failed).sum()
    }
}
