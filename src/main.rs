//! pagerelay CLI
//!
//! Command-line interface for running transfers

use clap::Parser;
use pagerelay::cli::{Cli, Runner};
use tracing::Level;

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for messages and stdout-sink items
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    match runner.run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
