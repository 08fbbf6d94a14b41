//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, IngestConfig};
use crate::engine::IngestEngine;
use crate::error::Result;
use crate::gateway::{DatabaseGateway, DryRunGateway, InsertGateway, Table};
use crate::source::SourceBucket;
use crate::types::ParseErrorPolicy;
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Ingest {
                dry_run,
                skip_bad_objects,
            } => self.ingest(*dry_run, *skip_bad_objects).await,
            Commands::Init => self.init(),
            Commands::Check => self.check().await,
            Commands::Objects => self.objects().await,
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<IngestConfig> {
        load_config(&self.cli.config)
    }

    /// Run the ingestion pipeline
    async fn ingest(&self, dry_run: bool, skip_bad_objects: bool) -> Result<()> {
        let mut config = self.load_config()?;
        if skip_bad_objects {
            config.on_parse_error = ParseErrorPolicy::Skip;
        }

        let stats = if dry_run {
            let source = SourceBucket::open(&config.source)?;
            let engine = IngestEngine::new(source, DryRunGateway::new())
                .with_parse_error_policy(config.on_parse_error);
            let stats = engine.ingest().await?;
            tracing::info!(
                "Dry run: {} inserts would have been issued",
                engine.gateway().attempted()
            );
            stats
        } else {
            IngestEngine::connect(&config)?.run().await?
        };

        self.output_message(&json!({
            "type": "INGEST_SUMMARY",
            "dryRun": dry_run,
            "stats": serde_json::to_value(&stats)?,
        }));

        Ok(())
    }

    /// Create the target tables
    fn init(&self) -> Result<()> {
        let config = self.load_config()?;
        let gateway = DatabaseGateway::connect(&config.database)?;
        let created = gateway.create_tables();
        gateway.close()?;
        created?;

        self.output_message(&json!({
            "type": "INIT",
            "tables": Table::ALL.iter().map(Table::name).collect::<Vec<_>>(),
        }));

        Ok(())
    }

    /// Check source and database connections
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;

        let status = match Self::check_connections(&config).await {
            Ok((objects, tables)) => json!({
                "status": "SUCCEEDED",
                "objects": objects,
                "tables": tables,
            }),
            Err(e) => json!({
                "status": "FAILED",
                "message": e.to_string(),
            }),
        };

        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": status,
        }));

        Ok(())
    }

    /// Object count and per-table row counts
    async fn check_connections(config: &IngestConfig) -> Result<(usize, Value)> {
        let source = SourceBucket::open(&config.source)?;
        let objects = source.list_objects().await?;

        let gateway = DatabaseGateway::connect(&config.database)?;
        let counts: Result<serde_json::Map<String, Value>> = Table::ALL
            .iter()
            .map(|table| {
                gateway
                    .count_rows(*table)
                    .map(|count| (table.name().to_string(), json!(count)))
            })
            .collect();
        gateway.close()?;

        Ok((objects.len(), Value::Object(counts?)))
    }

    /// List source objects
    async fn objects(&self) -> Result<()> {
        let config = self.load_config()?;
        let source = SourceBucket::open(&config.source)?;
        let objects = source.list_objects().await?;

        self.output_message(&json!({
            "type": "OBJECTS",
            "container": source.container(),
            "objects": objects,
        }));

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
