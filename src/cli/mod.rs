//! CLI module
//!
//! Command-line interface for running transfers.
//!
//! # Commands
//!
//! - `run` - Move every page from the source to the sink
//! - `validate` - Check a transfer definition

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
