//! # archive-ingest
//!
//! Loads archival item documents from an object store into a relational
//! database.
//!
//! Every object in the source container holds a JSON document whose
//! `content.results` array carries item records. Each record is projected
//! onto five tables (CallNumbers, Contributors, Items, Resources, Subjects)
//! and written one row at a time. Re-ingesting a record is a no-op for the
//! three tables keyed by `external_id`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use archive_ingest::{load_config, IngestEngine, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = load_config("ingest.yaml")?;
//!     let stats = IngestEngine::connect(&config)?.run().await?;
//!     println!("{} rows inserted", stats.total_inserted());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │    Source    │ → │    Record    │ → │    Mapper    │ → │   Gateway    │
//! ├──────────────┤   ├──────────────┤   ├──────────────┤   ├──────────────┤
//! │ GCS / S3     │   │ Document     │   │ CallNumbers  │   │ DuckDB file  │
//! │ R2 / Azure   │   │ Extractor    │   │ Contributors │   │ PostgreSQL   │
//! │ Local / Mem  │   │              │   │ Items        │   │ Dry run      │
//! │              │   │              │   │ Resources    │   │              │
//! │              │   │              │   │ Subjects     │   │              │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// YAML configuration
pub mod config;

/// Object store access
pub mod source;

/// Document parsing and record accessors
pub mod record;

/// Persistence gateway
pub mod gateway;

/// Table mappers
pub mod mapper;

/// Ingestion engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_config, load_config_from_str, IngestConfig};
pub use engine::{IngestEngine, IngestStats};
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
