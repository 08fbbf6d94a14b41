//! Source module
//!
//! Lists and downloads the JSON documents to ingest from an object store
//! (GCS, S3, R2, Azure, local filesystem, or in-memory).

mod bucket;

pub use bucket::SourceBucket;
