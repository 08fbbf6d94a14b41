//! The five table mappers

use super::types::TableMapper;
use crate::error::{Error, Result};
use crate::gateway::Table;
use crate::record::RecordExtractor;
use crate::types::SqlParam;

/// `(external_id, call_number)`; a missing call number is an error
#[derive(Debug, Clone, Copy, Default)]
pub struct CallNumbersMapper;

impl TableMapper for CallNumbersMapper {
    fn table(&self) -> Table {
        Table::CallNumbers
    }

    fn rows(&self, record: &RecordExtractor<'_>) -> Result<Vec<Vec<SqlParam>>> {
        let external_id = record.external_id()?;
        let call_number = record
            .first_call_number()?
            .ok_or_else(|| Error::missing_field("item.call_number"))?;

        Ok(vec![vec![text(external_id), text(call_number)]])
    }
}

/// `(external_id, contributor)`; no contributor means no row
#[derive(Debug, Clone, Copy, Default)]
pub struct ContributorsMapper;

impl TableMapper for ContributorsMapper {
    fn table(&self) -> Table {
        Table::Contributors
    }

    fn rows(&self, record: &RecordExtractor<'_>) -> Result<Vec<Vec<SqlParam>>> {
        let external_id = record.external_id()?;
        Ok(record
            .first_contributor()
            .map(|contributor| vec![text(external_id), text(contributor)])
            .into_iter()
            .collect())
    }
}

/// One Items row per record
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemsMapper;

impl TableMapper for ItemsMapper {
    fn table(&self) -> Table {
        Table::Items
    }

    fn rows(&self, record: &RecordExtractor<'_>) -> Result<Vec<Vec<SqlParam>>> {
        let external_id = record.external_id()?;
        let item = record.item_fields()?;

        Ok(vec![vec![
            Some(item.call_number),
            item.created_published,
            item.date,
            item.notes,
            item.source_collection,
            Some(item.title),
            text(external_id),
        ]])
    }
}

/// One Resources row per `resources` entry
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourcesMapper;

impl TableMapper for ResourcesMapper {
    fn table(&self) -> Table {
        Table::Resources
    }

    fn rows(&self, record: &RecordExtractor<'_>) -> Result<Vec<Vec<SqlParam>>> {
        let external_id = record.external_id()?;
        Ok(record
            .resources()
            .map(|resource| vec![text(external_id), resource.image, resource.pdf])
            .collect())
    }
}

/// One Subjects row per `subject` entry
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectsMapper;

impl TableMapper for SubjectsMapper {
    fn table(&self) -> Table {
        Table::Subjects
    }

    fn rows(&self, record: &RecordExtractor<'_>) -> Result<Vec<Vec<SqlParam>>> {
        let external_id = record.external_id()?;
        Ok(record
            .subjects()
            .map(|subject| vec![text(external_id), text(subject)])
            .collect())
    }
}

fn text(value: &str) -> SqlParam {
    Some(value.to_string())
}
