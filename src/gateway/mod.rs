//! Persistence gateway module
//!
//! Executes single-row parameterized inserts and classifies the result as
//! `Ok`, `DuplicateKey` or `Failure`.
//!
//! # Overview
//!
//! - `InsertGateway` - the trait the mappers write through
//! - `DatabaseGateway` - DuckDB-backed gateway (local file or attached PostgreSQL)
//! - `DryRunGateway` - accepts every row without writing
//! - `Table` - target table names, columns and DDL

mod engine;
mod table;
mod types;

pub use engine::{is_duplicate_key, DatabaseGateway};
pub use table::Table;
pub use types::{DryRunGateway, InsertGateway, InsertOutcome};
