//! Authenticator implementation
//!
//! Resolves an [`AuthConfig`] into the headers and query parameters a request
//! needs, and applies them to blocking request builders.

use super::types::{AuthConfig, Location};
use crate::types::StringMap;
use base64::Engine as _;
use reqwest::blocking::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// The auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Headers required by this auth configuration
    pub fn headers(&self) -> StringMap {
        let mut headers = StringMap::new();
        match &self.config {
            AuthConfig::None => {}
            AuthConfig::ApiKey {
                location: Location::Header,
                key,
                value,
            } => {
                headers.insert(key.clone(), value.clone());
            }
            AuthConfig::ApiKey {
                location: Location::Query,
                ..
            } => {}
            AuthConfig::Basic { username, password } => {
                let credentials =
                    base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
                headers.insert("Authorization".to_string(), format!("Basic {credentials}"));
            }
            AuthConfig::Bearer { token } => {
                headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            }
            AuthConfig::CustomHeaders { headers: custom } => {
                headers.extend(custom.clone());
            }
        }
        headers
    }

    /// Query parameters required by this auth configuration
    pub fn query_params(&self) -> StringMap {
        let mut params = StringMap::new();
        if let AuthConfig::ApiKey {
            location: Location::Query,
            key,
            value,
        } = &self.config
        {
            params.insert(key.clone(), value.clone());
        }
        params
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        let mut req = req;
        for (key, value) in self.headers() {
            req = req.header(key, value);
        }
        let params = self.query_params();
        if !params.is_empty() {
            req = req.query(&params);
        }
        req
    }
}
