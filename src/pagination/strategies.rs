//! Offset pagination strategy
//!
//! Turns raw JSON response bodies into [`PageResponse`] values and tracks the
//! offset cursor a source advances between requests.

use super::types::{extract_path, Item, PageResponse};
use crate::error::{Error, Result};
use crate::types::{JsonValue, StringMap};

/// Where the interesting fields live in a response body
#[derive(Debug, Clone, Default)]
pub struct ResponseLayout {
    /// Dotted path to the items array (`None` = the body itself is the array)
    pub items_path: Option<String>,
    /// Dotted path to a boolean "more pages" flag
    pub has_more_path: Option<String>,
    /// Dotted path to the total result count
    pub total_path: Option<String>,
}

impl ResponseLayout {
    /// Layout with an items path
    pub fn with_items(path: impl Into<String>) -> Self {
        Self {
            items_path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Set the has-more flag path
    #[must_use]
    pub fn has_more_at(mut self, path: impl Into<String>) -> Self {
        self.has_more_path = Some(path.into());
        self
    }

    /// Set the total count path
    #[must_use]
    pub fn total_at(mut self, path: impl Into<String>) -> Self {
        self.total_path = Some(path.into());
        self
    }
}

/// Offset-based pagination (e.g., `?offset=100&limit=50`)
#[derive(Debug, Clone)]
pub struct OffsetPagination {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for limit
    pub limit_param: String,
    /// Number of items per page
    pub limit: u32,
    /// Offset of the first request
    pub start_offset: u64,
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self {
            offset_param: "offset".to_string(),
            limit_param: "limit".to_string(),
            limit: 100,
            start_offset: 0,
        }
    }
}

impl OffsetPagination {
    /// Create a new offset pagination strategy
    pub fn new(offset_param: impl Into<String>, limit_param: impl Into<String>, limit: u32) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            limit,
            start_offset: 0,
        }
    }

    /// Start from a non-zero offset
    #[must_use]
    pub fn starting_at(mut self, offset: u64) -> Self {
        self.start_offset = offset;
        self
    }

    /// Cursor positioned at the first page
    pub fn initial_cursor(&self) -> OffsetCursor {
        OffsetCursor {
            offset: self.start_offset,
        }
    }

    /// Query parameters for the page at `cursor`
    pub fn query_params(&self, cursor: &OffsetCursor) -> StringMap {
        let mut params = StringMap::new();
        params.insert(self.offset_param.clone(), cursor.offset.to_string());
        params.insert(self.limit_param.clone(), self.limit.to_string());
        params
    }

    /// Decode a response body fetched at `cursor` into a page
    ///
    /// `has_more` comes from the layout's flag when present, otherwise from
    /// the reported total, otherwise from whether the page was full. An empty
    /// page is final whatever the body claims.
    pub fn decode_page(
        &self,
        body: &JsonValue,
        layout: &ResponseLayout,
        cursor: &OffsetCursor,
    ) -> Result<PageResponse> {
        let records = match &layout.items_path {
            Some(path) => extract_path(body, path)
                .ok_or_else(|| Error::decode(format!("No items found at path '{path}'")))?,
            None => body,
        };
        let records = records
            .as_array()
            .ok_or_else(|| Error::decode("Items value is not an array"))?;

        let items: Vec<Item> = records.iter().cloned().map(Item::from_record).collect();
        let count = items.len() as u64;

        let total = layout
            .total_path
            .as_deref()
            .and_then(|path| extract_path(body, path))
            .and_then(as_u64);

        let flag = layout
            .has_more_path
            .as_deref()
            .and_then(|path| extract_path(body, path))
            .and_then(as_bool);

        // an empty page never advances the cursor, so it is always the last
        let has_more = count > 0
            && match (flag, total) {
                (Some(flag), _) => flag,
                (None, Some(total)) => cursor.offset + count < total,
                (None, None) => count >= u64::from(self.limit),
            };

        Ok(PageResponse::new(items, has_more).with_window(
            cursor.offset,
            u64::from(self.limit),
            total,
        ))
    }
}

/// Position of the next request in an offset-paginated collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetCursor {
    /// Offset of the next page
    pub offset: u64,
}

impl OffsetCursor {
    /// Move past the items just received
    pub fn advance(&mut self, received: usize) {
        self.offset += received as u64;
    }
}

fn as_u64(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn as_bool(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}
