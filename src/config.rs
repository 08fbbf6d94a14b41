//! Ingestion configuration
//!
//! The run is driven entirely by an [`IngestConfig`] loaded from YAML and
//! passed explicitly into the engine. Nothing is read from ambient state
//! except the optional `PGPASSWORD` fallback for PostgreSQL.
//!
//! ```yaml
//! source:
//!   url: gs://processed_results
//!   service_account_path: ./service-account.json
//! database:
//!   engine: duckdb
//!   path: ./archive.duckdb
//! on_parse_error: abort
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::types::{DatabaseEngine, ParseErrorPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Where the JSON documents live
    pub source: SourceConfig,

    /// Where the relational rows go
    pub database: DatabaseConfig,

    /// Behavior when an object cannot be parsed
    #[serde(default)]
    pub on_parse_error: ParseErrorPolicy,
}

/// Object store source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Container URL: `gs://`, `s3://`, `r2://`, `az://`, `memory://` or a local path
    pub url: String,

    /// Google service account key file (GCS only)
    #[serde(default)]
    pub service_account_path: Option<PathBuf>,
}

/// Target database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database engine
    #[serde(default)]
    pub engine: DatabaseEngine,

    /// DuckDB database file (or `:memory:`)
    #[serde(default)]
    pub path: Option<String>,

    /// Full PostgreSQL connection string; takes precedence over the parts below
    #[serde(default)]
    pub connection_string: Option<String>,

    /// PostgreSQL host
    #[serde(default)]
    pub host: Option<String>,

    /// PostgreSQL port
    #[serde(default)]
    pub port: Option<u16>,

    /// PostgreSQL database name
    #[serde(default)]
    pub database: Option<String>,

    /// PostgreSQL user
    #[serde(default)]
    pub user: Option<String>,

    /// PostgreSQL password (falls back to `PGPASSWORD`)
    #[serde(default)]
    pub password: Option<String>,
}

impl DatabaseConfig {
    /// DuckDB config for a database file
    pub fn duckdb(path: impl Into<String>) -> Self {
        Self {
            engine: DatabaseEngine::Duckdb,
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Build the PostgreSQL connection string from config
    pub fn postgres_connection_string(&self) -> String {
        if let Some(ref conn_str) = self.connection_string {
            return conn_str.clone();
        }

        let host = self.host.as_deref().unwrap_or("localhost");
        let port = self.port.unwrap_or(5432);
        let user = self.user.as_deref().unwrap_or("postgres");
        let database = self.database.as_deref().unwrap_or("postgres");
        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("PGPASSWORD").ok())
            .unwrap_or_default();

        format!("postgresql://{user}:{password}@{host}:{port}/{database}")
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a config file
pub fn load_config(path: impl AsRef<Path>) -> Result<IngestConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    load_config_from_str(&content)
}

/// Load and validate a config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<IngestConfig> {
    let config: IngestConfig = serde_yaml::from_str(yaml)?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate a parsed config
fn validate_config(config: &IngestConfig) -> Result<()> {
    let url = config.source.url.trim();
    if url.is_empty() {
        return Err(Error::missing_config_field("source.url"));
    }

    if let Some((scheme, _)) = url.split_once("://") {
        let known = ["gs", "s3", "r2", "az", "memory", "file"];
        if !known.contains(&scheme) {
            return Err(Error::invalid_config(
                "source.url",
                format!("unsupported scheme '{scheme}'"),
            ));
        }
    }

    let db = &config.database;
    match db.engine {
        DatabaseEngine::Duckdb => {
            if db.path.as_deref().map_or(true, str::is_empty) {
                return Err(Error::missing_config_field("database.path"));
            }
        }
        DatabaseEngine::Postgres => {
            if db.connection_string.is_none() && db.host.is_none() && db.database.is_none() {
                return Err(Error::invalid_config(
                    "database",
                    "postgres requires connection_string or host/database",
                ));
            }
        }
    }

    Ok(())
}
