//! YAML parser for transfer definitions
//!
//! Parses, validates and renders transfer YAML files.

use crate::error::{Error, Result};
use crate::loader::types::{
    parse_sink_method, AuthDefinition, SinkDefinition, SourceDefinition, TransferDefinition,
};
use crate::template::{self, TemplateContext};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a transfer definition from a file path
pub fn load_definition(path: impl AsRef<Path>) -> Result<TransferDefinition> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read definition file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    let def = load_definition_from_str(&content)?;
    debug!(path = %path.display(), name = %def.name, "Loaded transfer definition");
    Ok(def)
}

/// Load a transfer definition from a YAML string
pub fn load_definition_from_str(yaml: &str) -> Result<TransferDefinition> {
    let def: TransferDefinition = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse transfer YAML: {e}")))?;

    validate_definition(&def)?;
    Ok(def)
}

/// Substitute `{{ config.* }}` and `{{ env.* }}` placeholders
///
/// Every string in the definition is rendered; the result is validated again.
pub fn render_definition(
    def: &TransferDefinition,
    ctx: &TemplateContext,
) -> Result<TransferDefinition> {
    let raw = serde_json::to_value(def)?;
    let rendered = template::render_value(&raw, ctx)?;
    let def: TransferDefinition = serde_json::from_value(rendered)?;
    validate_definition(&def)?;
    Ok(def)
}

/// Validate a transfer definition
fn validate_definition(def: &TransferDefinition) -> Result<()> {
    if def.name.trim().is_empty() {
        return Err(Error::config("Transfer name cannot be empty"));
    }

    if def.http.timeout_secs == 0 {
        return Err(Error::invalid_value("http.timeout_secs", "must be positive"));
    }

    validate_source(&def.source)?;
    validate_sink(&def.sink)
}

fn validate_source(source: &SourceDefinition) -> Result<()> {
    match source {
        SourceDefinition::Http {
            url,
            pagination,
            auth,
            ..
        } => {
            if url.is_empty() {
                return Err(Error::config("Source url cannot be empty"));
            }
            if pagination.limit == 0 {
                return Err(Error::invalid_value(
                    "source.pagination.limit",
                    "must be positive",
                ));
            }
            if pagination.offset_param == pagination.limit_param {
                return Err(Error::invalid_value(
                    "source.pagination",
                    "offset_param and limit_param must differ",
                ));
            }
            validate_auth(auth.as_ref())
        }
        SourceDefinition::File { path } => {
            if path.is_empty() {
                return Err(Error::config("Source path cannot be empty"));
            }
            Ok(())
        }
    }
}

fn validate_sink(sink: &SinkDefinition) -> Result<()> {
    match sink {
        SinkDefinition::Http { url, method, auth } => {
            if url.is_empty() {
                return Err(Error::config("Sink url cannot be empty"));
            }
            parse_sink_method(method)?;
            validate_auth(auth.as_ref())
        }
        SinkDefinition::Jsonl { path } => {
            if path.is_empty() {
                return Err(Error::config("Sink path cannot be empty"));
            }
            Ok(())
        }
        SinkDefinition::Stdout => Ok(()),
    }
}

fn validate_auth(auth: Option<&AuthDefinition>) -> Result<()> {
    auth.map_or(Ok(()), |auth| auth.to_config().map(|_| ()))
}
