//! # pagerelay
//!
//! Moves paginated data from a page source to an item sink, one page at a
//! time, and stops at the first failure or after the last page.
//!
//! ## Features
//!
//! - **Outcome values**: Every collaborator call returns an [`Outcome`]; no
//!   unwinding crosses the transfer loop
//! - **Lazy cycles**: Cycles come from a [`LazySequence`], so nothing is fetched
//!   or published past the terminal cycle
//! - **Offset pagination**: JSON API sources with flag, total or full-page
//!   termination
//! - **Sinks**: HTTP, JSON Lines files, stdout, or any [`sink::PublishClient`]
//! - **YAML definitions**: Declarative transfers with `{{ config.* }}` templates
//!
//! ## Quick Start
//!
//! ```rust
//! use pagerelay::sink::CollectingSink;
//! use pagerelay::source::ScriptedSource;
//! use pagerelay::{Item, PageResponse, PaginationDriver};
//! use serde_json::json;
//!
//! let source = ScriptedSource::pages(vec![
//!     PageResponse::with_more(vec![Item::new(json!({"sku": "a"}))]),
//!     PageResponse::last(vec![Item::new(json!({"sku": "b"}))]),
//! ]);
//! let mut driver = PaginationDriver::new(source, CollectingSink::new());
//!
//! assert!(driver.transfer().success().unwrap());
//! assert_eq!(driver.sink().items().count(), 2);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PaginationDriver                        │
//! │   continually(cycle).find(is_terminal) → Outcome<Error,bool>│
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴───────────┬──────────────────┐
//! │  PageSource  │        ItemSink          │     Metered      │
//! ├──────────────┼──────────────────────────┼──────────────────┤
//! │ HTTP offset  │ HTTP POST/PUT/PATCH      │ TransferStats    │
//! │ File         │ JSON Lines / stdout      │                  │
//! │ Scripted     │ Collecting / Guarded     │                  │
//! └──────────────┴──────────────────────────┴──────────────────┘
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for pagerelay
pub mod error;

/// Common types and type aliases
pub mod types;

/// Success/failure values
pub mod outcome;

/// Lazily evaluated sequences
pub mod sequence;

/// Authentication implementations
pub mod auth;

/// Blocking HTTP client
pub mod http;

/// Pages, items and offset pagination
pub mod pagination;

/// Page sources
pub mod source;

/// Item sinks
pub mod sink;

/// Transfer driver and metering
pub mod engine;

/// YAML loader for transfer definitions
pub mod loader;

/// Template interpolation
pub mod template;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use engine::{PaginationDriver, TransferResult};
pub use error::{Error, Result};
pub use outcome::Outcome;
pub use pagination::{Item, PageResponse};
pub use sequence::LazySequence;
pub use sink::ItemSink;
pub use source::PageSource;

// Re-export commonly used types
pub use loader::{load_definition, load_definition_from_str, TransferDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
