//! Source document parsing
//!
//! A document is one downloaded object: a JSON object whose
//! `content.results` array holds the records to ingest.

use super::extractor::RecordExtractor;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// A parsed source document
#[derive(Debug, Clone)]
pub struct Document {
    /// Object identifier the document was downloaded from
    object: String,
    /// Records in array order
    records: Vec<JsonObject>,
}

impl Document {
    /// Parse downloaded text
    ///
    /// Fails on malformed JSON, a missing `content.results` array, or a
    /// results entry that is not an object.
    pub fn parse(object: impl Into<String>, text: &str) -> Result<Self> {
        let object = object.into();

        let value: JsonValue = serde_json::from_str(text)
            .map_err(|e| Error::parse(&object, format!("invalid JSON: {e}")))?;

        let results = match value {
            JsonValue::Object(mut root) => match root.remove("content") {
                Some(JsonValue::Object(mut content)) => content.remove("results"),
                _ => None,
            },
            _ => None,
        };

        let Some(JsonValue::Array(results)) = results else {
            return Err(Error::parse(&object, "missing content.results array"));
        };

        let records = results
            .into_iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                JsonValue::Object(record) => Ok(record),
                _ => Err(Error::parse(
                    &object,
                    format!("content.results[{index}] is not an object"),
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { object, records })
    }

    /// Object identifier
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the results array was empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record views in array order
    pub fn records(&self) -> impl Iterator<Item = RecordExtractor<'_>> {
        self.records.iter().map(RecordExtractor::new)
    }
}
