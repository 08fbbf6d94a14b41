//! Common types used throughout archive-ingest
//!
//! This module contains shared type definitions, type aliases,
//! and small enums used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One positional insert parameter. `None` binds SQL NULL.
pub type SqlParam = Option<String>;

// ============================================================================
// Database Engine
// ============================================================================

/// Target database engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseEngine {
    /// Embedded DuckDB database file
    #[default]
    Duckdb,
    /// PostgreSQL, attached through DuckDB's postgres extension
    Postgres,
}

impl std::fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseEngine::Duckdb => write!(f, "duckdb"),
            DatabaseEngine::Postgres => write!(f, "postgres"),
        }
    }
}

// ============================================================================
// Parse Error Policy
// ============================================================================

/// What to do when a source object cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorPolicy {
    /// Abort the whole run
    #[default]
    Abort,
    /// Log the object, count it as skipped, continue with the next one
    Skip,
}
