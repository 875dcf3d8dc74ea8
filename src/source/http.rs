//! HTTP page source
//!
//! Pulls pages from a JSON API using offset/limit pagination. The cursor
//! lives here, so the driver never passes pagination state around.

use super::PageSource;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::outcome::Outcome;
use crate::pagination::{OffsetCursor, OffsetPagination, PageResponse, ResponseLayout};
use crate::types::{JsonValue, StringMap};
use tracing::debug;

/// Offset-paginated JSON API source
#[derive(Debug)]
pub struct HttpPageSource {
    client: HttpClient,
    url: String,
    params: StringMap,
    pagination: OffsetPagination,
    layout: ResponseLayout,
    cursor: OffsetCursor,
}

impl HttpPageSource {
    /// Create a source reading from `url`
    pub fn new(
        client: HttpClient,
        url: impl Into<String>,
        pagination: OffsetPagination,
        layout: ResponseLayout,
    ) -> Self {
        let cursor = pagination.initial_cursor();
        Self {
            client,
            url: url.into(),
            params: StringMap::new(),
            pagination,
            layout,
            cursor,
        }
    }

    /// Add fixed query parameters sent with every request
    #[must_use]
    pub fn with_params(mut self, params: StringMap) -> Self {
        self.params.extend(params);
        self
    }

    /// Current cursor position
    pub fn cursor(&self) -> OffsetCursor {
        self.cursor
    }

    fn request_page(&mut self) -> Result<PageResponse> {
        let request = RequestConfig::new()
            .queries(self.params.clone())
            .queries(self.pagination.query_params(&self.cursor));

        let body: JsonValue = self.client.get_json_with_config(&self.url, request)?;
        let page = self.pagination.decode_page(&body, &self.layout, &self.cursor)?;

        debug!(
            offset = self.cursor.offset,
            items = page.items.len(),
            has_more = page.has_more,
            "Fetched page"
        );
        self.cursor.advance(page.items.len());
        Ok(page)
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&mut self) -> Outcome<Error, PageResponse> {
        Outcome::from(self.request_page()).map_failure(Error::fetch)
    }
}
