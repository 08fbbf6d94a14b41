//! Ingestion engine module
//!
//! Lists the source container, then downloads, parses and maps every object
//! in listing order.
//!
//! # Overview
//!
//! - `IngestEngine` - sequential list/download/parse/map loop over one gateway
//! - `IngestStats` - run summary with per-table counters
//!
//! Objects, records and mappers are all processed strictly one at a time.
//! Per-row outcomes never stop the run; listing and download errors always
//! do, and parse errors do unless the skip policy is in effect.

mod types;

pub use types::{IngestStats, TableStats};

use crate::config::IngestConfig;
use crate::error::Result;
use crate::gateway::{DatabaseGateway, InsertGateway};
use crate::mapper::{default_pipeline, TableMapper};
use crate::record::Document;
use crate::source::SourceBucket;
use crate::types::ParseErrorPolicy;
use std::time::Instant;

/// Ingestion engine for one source container and one gateway
pub struct IngestEngine<G: InsertGateway> {
    /// Source documents
    source: SourceBucket,
    /// Persistence gateway
    gateway: G,
    /// Mappers run for every record, in order
    mappers: Vec<Box<dyn TableMapper>>,
    /// Behavior on unparseable objects
    on_parse_error: ParseErrorPolicy,
}

impl IngestEngine<DatabaseGateway> {
    /// Open the configured source and database
    pub fn connect(config: &IngestConfig) -> Result<Self> {
        let source = SourceBucket::open(&config.source)?;
        let gateway = DatabaseGateway::connect(&config.database)?;
        tracing::info!(
            "Connected to {} database {}",
            gateway.engine(),
            gateway.target_info()
        );

        Ok(Self::new(source, gateway).with_parse_error_policy(config.on_parse_error))
    }
}

impl<G: InsertGateway> IngestEngine<G> {
    /// Create a new engine running the default mapper pipeline
    pub fn new(source: SourceBucket, gateway: G) -> Self {
        Self {
            source,
            gateway,
            mappers: default_pipeline(),
            on_parse_error: ParseErrorPolicy::default(),
        }
    }

    /// Set the parse error policy
    #[must_use]
    pub fn with_parse_error_policy(mut self, policy: ParseErrorPolicy) -> Self {
        self.on_parse_error = policy;
        self
    }

    /// Replace the mapper pipeline
    #[must_use]
    pub fn with_mappers(mut self, mappers: Vec<Box<dyn TableMapper>>) -> Self {
        self.mappers = mappers;
        self
    }

    /// Get the gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Get the source
    pub fn source(&self) -> &SourceBucket {
        &self.source
    }

    /// Ingest every object, then release the gateway
    ///
    /// The gateway is closed whether or not ingestion succeeds; an ingestion
    /// error takes precedence over a close error.
    pub async fn run(self) -> Result<IngestStats> {
        let result = self.ingest().await;
        let closed = self.gateway.close();
        let stats = result?;
        closed?;
        Ok(stats)
    }

    /// Ingest every object in listing order
    pub async fn ingest(&self) -> Result<IngestStats> {
        let start = Instant::now();
        let mut stats = IngestStats::new();

        let objects = self.source.list_objects().await?;
        stats.objects_listed = objects.len();
        tracing::info!(
            "Found {} objects in {}",
            objects.len(),
            self.source.container()
        );

        for object in &objects {
            self.ingest_object(object, &mut stats).await?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Ingestion complete: {} objects, {} records, {} rows inserted, {} failed in {}ms",
            stats.objects_processed,
            stats.records_processed,
            stats.total_inserted(),
            stats.total_failed(),
            stats.duration_ms
        );

        Ok(stats)
    }

    async fn ingest_object(&self, object: &str, stats: &mut IngestStats) -> Result<()> {
        let text = self.source.download_text(object).await?;

        let document = match Document::parse(object, &text) {
            Ok(document) => document,
            Err(e) if e.is_parse_error() && self.on_parse_error == ParseErrorPolicy::Skip => {
                tracing::warn!("Skipping {}: {}", object, e);
                stats.skip_object(object);
                return Ok(());
            }
            Err(e) => {
                tracing::error!("Aborting on {}: {}", object, e);
                return Err(e);
            }
        };

        tracing::info!(
            "Processing {} ({} records)",
            document.object(),
            document.len()
        );

        for record in document.records() {
            for mapper in &self.mappers {
                let report = mapper.apply(&record, &self.gateway);
                stats.add_report(&report);
            }
            stats.records_processed += 1;
        }
        stats.objects_processed += 1;

        Ok(())
    }
}
