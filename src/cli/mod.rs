//! CLI module
//!
//! Command-line interface for running ingestion.
//!
//! # Commands
//!
//! - `ingest` - Load every source object into the database
//! - `init` - Create the target tables
//! - `check` - Test source and database connections
//! - `objects` - List source object identifiers

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
