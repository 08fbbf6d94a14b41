//! Record module
//!
//! Parses downloaded documents and exposes each result record through a
//! typed, missing-field tolerant view.
//!
//! # Overview
//!
//! - `Document` - one parsed object with its `content.results` records
//! - `RecordExtractor` - accessors for id, call numbers, contributors,
//!   item metadata, resources and subjects

mod document;
mod extractor;

pub use document::Document;
pub use extractor::{ItemFields, RecordExtractor, ResourceFields};
