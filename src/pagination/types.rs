//! Pagination types
//!
//! The page and item values that flow from a page source to an item sink.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque unit of transferred data
///
/// The pipeline never looks inside `payload`; it forwards whole pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Item contents
    #[serde(default)]
    pub payload: JsonValue,
}

impl Item {
    /// Create an item with a fresh identifier
    pub fn new(payload: JsonValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
        }
    }

    /// Create an item with a known identifier
    pub fn with_id(id: Uuid, payload: JsonValue) -> Self {
        Self { id, payload }
    }

    /// Build an item from a raw API record
    ///
    /// The record's `id` field is reused when it is a UUID string.
    pub fn from_record(record: JsonValue) -> Self {
        let id = record
            .get("id")
            .and_then(JsonValue::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);
        Self {
            id,
            payload: record,
        }
    }
}

/// One page returned by a page source
///
/// `total_results`, `count`, `limit` and `offset` are informational; only
/// `has_more` drives the transfer loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    /// Items in fetch order
    #[serde(default)]
    pub items: Vec<Item>,
    /// Whether a subsequent page exists
    #[serde(default)]
    pub has_more: bool,
    /// Total number of results reported by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    /// Number of items on this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Requested page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Offset of the first item on this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl PageResponse {
    /// Create a page
    pub fn new(items: Vec<Item>, has_more: bool) -> Self {
        Self {
            items,
            has_more,
            ..Default::default()
        }
    }

    /// A page followed by more pages
    pub fn with_more(items: Vec<Item>) -> Self {
        Self::new(items, true)
    }

    /// The final page
    pub fn last(items: Vec<Item>) -> Self {
        Self::new(items, false)
    }

    /// Attach the informational counters
    #[must_use]
    pub fn with_window(mut self, offset: u64, limit: u64, total_results: Option<u64>) -> Self {
        self.count = Some(self.items.len() as u64);
        self.offset = Some(offset);
        self.limit = Some(limit);
        self.total_results = total_results;
        self
    }

    /// Check if this is the final page
    pub fn is_last(&self) -> bool {
        !self.has_more
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Extract a JSON value by a dotted path (a leading `$.` is ignored)
pub fn extract_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        current = match current {
            JsonValue::Object(map) => map.get(part)?,
            JsonValue::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
