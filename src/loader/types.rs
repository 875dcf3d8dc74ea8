//! Transfer definition types
//!
//! Serde types for declarative YAML transfer definitions.

use crate::auth::{AuthConfig, Location};
use crate::error::{Error, Result};
use crate::pagination::{OffsetPagination, ResponseLayout};
use crate::types::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Transfer Definition
// ============================================================================

/// A complete transfer definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransferDefinition {
    /// Transfer name
    pub name: String,
    /// Where pages come from
    pub source: SourceDefinition,
    /// Where items go
    pub sink: SinkDefinition,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpDefinition,
    /// Headers sent with every HTTP request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

// ============================================================================
// Source Definition
// ============================================================================

/// Page source definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceDefinition {
    /// Offset-paginated JSON API
    Http {
        /// Endpoint URL
        url: String,
        /// Dotted path to the items array; absent when the body is the array
        #[serde(default)]
        items_path: Option<String>,
        /// Pagination settings
        #[serde(default)]
        pagination: PaginationDefinition,
        /// Authentication
        #[serde(default)]
        auth: Option<AuthDefinition>,
        /// Fixed query parameters
        #[serde(default)]
        params: HashMap<String, String>,
    },
    /// Pages stored in a JSON or JSON Lines file
    File {
        /// File path
        path: String,
    },
}

impl SourceDefinition {
    /// Short name of the source type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::File { .. } => "file",
        }
    }
}

/// Offset pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaginationDefinition {
    /// Query parameter carrying the offset
    #[serde(default = "default_offset_param")]
    pub offset_param: String,
    /// Query parameter carrying the page size
    #[serde(default = "default_limit_param")]
    pub limit_param: String,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Offset of the first request
    #[serde(default)]
    pub start_offset: u64,
    /// Dotted path to a boolean "more pages" flag
    #[serde(default)]
    pub has_more_path: Option<String>,
    /// Dotted path to the total result count
    #[serde(default)]
    pub total_path: Option<String>,
}

impl Default for PaginationDefinition {
    fn default() -> Self {
        Self {
            offset_param: default_offset_param(),
            limit_param: default_limit_param(),
            limit: default_limit(),
            start_offset: 0,
            has_more_path: None,
            total_path: None,
        }
    }
}

impl PaginationDefinition {
    /// Build the pagination strategy
    pub fn strategy(&self) -> OffsetPagination {
        OffsetPagination::new(&self.offset_param, &self.limit_param, self.limit)
            .starting_at(self.start_offset)
    }

    /// Build the response layout for an items path
    pub fn layout(&self, items_path: Option<&str>) -> ResponseLayout {
        ResponseLayout {
            items_path: items_path.map(str::to_string),
            has_more_path: self.has_more_path.clone(),
            total_path: self.total_path.clone(),
        }
    }
}

fn default_offset_param() -> String {
    "offset".to_string()
}

fn default_limit_param() -> String {
    "limit".to_string()
}

fn default_limit() -> u32 {
    100
}

// ============================================================================
// Sink Definition
// ============================================================================

/// Item sink definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkDefinition {
    /// JSON API receiving each page as an array
    Http {
        /// Endpoint URL
        url: String,
        /// HTTP method: POST, PUT or PATCH
        #[serde(default = "default_sink_method")]
        method: String,
        /// Authentication
        #[serde(default)]
        auth: Option<AuthDefinition>,
    },
    /// JSON Lines file
    Jsonl {
        /// File path
        path: String,
    },
    /// JSON Lines on standard output
    Stdout,
}

impl SinkDefinition {
    /// Short name of the sink type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } => "http",
            Self::Jsonl { .. } => "jsonl",
            Self::Stdout => "stdout",
        }
    }
}

fn default_sink_method() -> String {
    "POST".to_string()
}

// ============================================================================
// Auth Definition
// ============================================================================

/// Authentication definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthDefinition {
    /// API key authentication
    #[serde(rename = "api_key")]
    ApiKey {
        /// Header or query param name
        key: String,
        /// Value (usually a template like `{{ config.api_key }}`)
        value: String,
        /// Location: header or query
        #[serde(default = "default_auth_location")]
        location: String,
    },
    /// Bearer token authentication
    #[serde(rename = "bearer")]
    Bearer {
        /// Token value (template)
        token: String,
    },
    /// Basic authentication
    #[serde(rename = "basic")]
    Basic {
        /// Username (template)
        username: String,
        /// Password (template)
        password: String,
    },
    /// Extra headers carrying credentials
    #[serde(rename = "custom_headers")]
    CustomHeaders {
        /// Header values (templates)
        headers: HashMap<String, String>,
    },
    /// No authentication
    #[serde(rename = "none")]
    None,
}

impl AuthDefinition {
    /// Convert into runtime auth configuration
    ///
    /// Templates must already be rendered.
    pub fn to_config(&self) -> Result<AuthConfig> {
        let config = match self {
            Self::ApiKey {
                key,
                value,
                location,
            } => {
                if key.is_empty() {
                    return Err(Error::missing_field("auth.key"));
                }
                AuthConfig::ApiKey {
                    location: Location::parse(location),
                    key: key.clone(),
                    value: value.clone(),
                }
            }
            Self::Bearer { token } => AuthConfig::Bearer {
                token: token.clone(),
            },
            Self::Basic { username, password } => AuthConfig::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            Self::CustomHeaders { headers } => AuthConfig::CustomHeaders {
                headers: headers.clone(),
            },
            Self::None => AuthConfig::None,
        };
        Ok(config)
    }
}

fn default_auth_location() -> String {
    "header".to_string()
}

// ============================================================================
// HTTP Definition
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpDefinition {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpDefinition {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Parse a sink method name into one that carries a body
pub(crate) fn parse_sink_method(name: &str) -> Result<Method> {
    match Method::parse(name) {
        Some(method) if method.has_body() => Ok(method),
        _ => Err(Error::invalid_value(
            "sink.method",
            format!("unsupported method '{name}', expected POST, PUT or PATCH"),
        )),
    }
}
