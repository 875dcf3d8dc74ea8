//! YAML Loader module
//!
//! Parse transfer definitions from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `TransferDefinition` - Declarative source, sink and HTTP settings
//! - YAML parsing with validation
//! - Template rendering of `{{ config.* }}` and `{{ env.* }}` placeholders

mod parser;
mod types;

pub use parser::{load_definition, load_definition_from_str, render_definition};
pub use types::{
    AuthDefinition, HttpDefinition, PaginationDefinition, SinkDefinition, SourceDefinition,
    TransferDefinition,
};
pub(crate) use types::parse_sink_method;

#[cfg(test)]
mod tests;
