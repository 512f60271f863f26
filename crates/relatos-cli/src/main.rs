//! Relatos CLI - Command-line interface
//!
//! Registers reporters and incident reports against two local JSON files.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod output;
mod output_types;
mod storage;

use clap::Parser;
use cli::Cli;

fn main() {
    // Logs go to stderr so --json output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        errors::from_anyhow(&e).display();
        std::process::exit(1);
    }
}
