//! Table mapper module
//!
//! Turns one record into rows for the five target tables.
//!
//! # Overview
//!
//! - `TableMapper` - extraction and per-row insert for one table
//! - `MapperReport` - inserted/duplicate/failed counts for one record
//! - `default_pipeline` - the five mappers in write order
//!
//! Adding a table means implementing `TableMapper` and appending it to the
//! pipeline.

mod mappers;
mod types;

pub use mappers::{CallNumbersMapper, ContributorsMapper, ItemsMapper, ResourcesMapper, SubjectsMapper};
pub use types::{MapperReport, TableMapper};

/// The five mappers in per-record write order
pub fn default_pipeline() -> Vec<Box<dyn TableMapper>> {
    vec![
        Box::new(CallNumbersMapper),
        Box::new(ContributorsMapper),
        Box::new(ItemsMapper),
        Box::new(ResourcesMapper),
        Box::new(SubjectsMapper),
    ]
}
