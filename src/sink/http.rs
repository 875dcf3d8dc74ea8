//! HTTP sink
//!
//! Sends every page as a single JSON array request body.

use super::ItemSink;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::outcome::Outcome;
use crate::pagination::Item;
use crate::types::Method;
use tracing::debug;

/// Publishes pages to a JSON API
#[derive(Debug)]
pub struct HttpSink {
    client: HttpClient,
    url: String,
    method: Method,
}

impl HttpSink {
    /// Create a sink that POSTs to `url`
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            method: Method::POST,
        }
    }

    /// Use a different method
    ///
    /// `GET` is rejected since it carries no body.
    pub fn with_method(mut self, method: Method) -> Result<Self> {
        if !method.has_body() {
            return Err(Error::invalid_value(
                "sink.method",
                format!("{method:?} cannot carry a request body"),
            ));
        }
        self.method = method;
        Ok(self)
    }

    /// Method used for every request
    pub fn method(&self) -> Method {
        self.method
    }

    fn send_page(&self, items: &[Item]) -> Result<()> {
        let body = serde_json::to_value(items)?;
        let request = RequestConfig::new().json(body);
        self.client.request(self.method, &self.url, request)?;
        debug!(items = items.len(), url = %self.url, "Published page");
        Ok(())
    }
}

impl ItemSink for HttpSink {
    fn publish(&mut self, items: &[Item]) -> Outcome<Error, bool> {
        if items.is_empty() {
            return Outcome::Success(true);
        }
        Outcome::from(self.send_page(items))
            .map(|()| true)
            .map_failure(Error::publish)
    }
}

