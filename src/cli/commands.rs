//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Archival item ingestion CLI
#[derive(Parser, Debug)]
#[command(name = "archive-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ingestion config file (YAML)
    #[arg(short, long, global = true, default_value = "ingest.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest every source object into the database
    Ingest {
        /// Map every record without writing to the database
        #[arg(long)]
        dry_run: bool,

        /// Skip objects that cannot be parsed instead of aborting
        #[arg(long)]
        skip_bad_objects: bool,
    },

    /// Create the target tables (DuckDB only)
    Init,

    /// Test the source and database connections and report row counts
    Check,

    /// List source object identifiers in processing order
    Objects,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Indented JSON output
    Pretty,
}
