//! Typed, read-only view over one result record

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// Item metadata projected for the Items table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub call_number: String,
    pub created_published: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub source_collection: Option<String>,
    pub title: String,
}

/// One entry of a record's `resources` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFields {
    pub image: Option<String>,
    pub pdf: Option<String>,
}

/// Accessors over one parsed record
///
/// Borrowing view: every accessor re-reads the underlying JSON, so the
/// sequences returned by [`resources`](Self::resources) and
/// [`subjects`](Self::subjects) can be requested any number of times.
#[derive(Debug, Clone, Copy)]
pub struct RecordExtractor<'a> {
    record: &'a JsonObject,
}

impl<'a> RecordExtractor<'a> {
    /// Wrap one record object
    pub fn new(record: &'a JsonObject) -> Self {
        Self { record }
    }

    /// Wrap a record value, which must be a JSON object
    #[cfg(test)]
    pub(crate) fn from_value(value: &'a JsonValue) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// The record's external identifier (`id`)
    pub fn external_id(&self) -> Result<&'a str> {
        self.record
            .get("id")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::missing_field("id"))
    }

    /// First entry of `item.call_number`
    ///
    /// A missing `item` object or `call_number` list is an error; an empty
    /// list yields `None`.
    pub fn first_call_number(&self) -> Result<Option<&'a str>> {
        let list = self
            .item()
            .and_then(|item| item.get("call_number"))
            .and_then(JsonValue::as_array)
            .ok_or_else(|| Error::missing_field("item.call_number"))?;

        Ok(list.first().and_then(JsonValue::as_str))
    }

    /// First entry of `contributor`, if any
    pub fn first_contributor(&self) -> Option<&'a str> {
        self.record
            .get("contributor")
            .and_then(JsonValue::as_array)
            .and_then(|list| list.first())
            .and_then(JsonValue::as_str)
    }

    /// Item metadata for the Items table
    ///
    /// `call_number` and `title` are mandatory.
    pub fn item_fields(&self) -> Result<ItemFields> {
        let call_number = self
            .first_call_number()?
            .ok_or_else(|| Error::missing_field("item.call_number"))?;

        let title = self
            .record
            .get("title")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::missing_field("title"))?;

        let item = self.item();
        let optional = |key: &str| item.and_then(|item| item.get(key)).and_then(optional_text);

        Ok(ItemFields {
            call_number: call_number.to_string(),
            created_published: optional("created_published"),
            date: optional("date"),
            notes: optional("notes"),
            source_collection: optional("source_collection"),
            title: title.to_string(),
        })
    }

    /// Entries of `resources`; non-object entries are skipped
    pub fn resources(&self) -> impl Iterator<Item = ResourceFields> + 'a {
        let id = self.log_id();
        self.list("resources")
            .filter_map(move |entry| {
                let resource = entry.as_object();
                if resource.is_none() {
                    tracing::warn!("Skipping non-object resources entry for {}: {}", id, entry);
                }
                resource
            })
            .map(|resource| ResourceFields {
                image: resource.get("image").and_then(optional_text),
                pdf: resource.get("pdf").and_then(optional_text),
            })
    }

    /// Entries of `subject`; non-string entries are skipped
    pub fn subjects(&self) -> impl Iterator<Item = &'a str> + 'a {
        let id = self.log_id();
        self.list("subject").filter_map(move |entry| {
            let subject = entry.as_str();
            if subject.is_none() {
                tracing::warn!("Skipping non-string subject entry for {}: {}", id, entry);
            }
            subject
        })
    }

    fn log_id(&self) -> &'a str {
        self.external_id().unwrap_or("<missing id>")
    }

    fn item(&self) -> Option<&'a JsonObject> {
        self.record.get("item").and_then(JsonValue::as_object)
    }

    fn list(&self, key: &str) -> std::slice::Iter<'a, JsonValue> {
        const EMPTY: &[JsonValue] = &[];
        let list: &'a [JsonValue] = self
            .record
            .get(key)
            .and_then(JsonValue::as_array)
            .map_or(EMPTY, Vec::as_slice);
        list.iter()
    }
}

/// Text of an optional field
///
/// `null` counts as absent. Other non-string values keep their JSON text,
/// so `["1890"]` is stored as `["1890"]` and `42` as `42`.
fn optional_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
