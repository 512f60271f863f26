//! Command implementations

mod report;
mod reporter;
mod search;
mod status;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::errors;
use crate::output::OutputWriter;
use crate::storage::{open_registry, FileRegistry};
use anyhow::Result;
use relatos_core::RelatosError;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;
    let mut registry = open_registry(&config.settings(), &output);

    match cli.command {
        Commands::AddReporter(args) => reporter::execute(args, &mut registry, &output),
        Commands::AddReport(args) => report::execute(args, &mut registry, &output),
        Commands::SearchByType(args) => search::by_type(args, &registry, &output),
        Commands::SearchByPeriod(args) => search::by_period(args, &registry, &output),
        Commands::SearchByLocation(args) => search::by_location(args, &registry, &output),
        Commands::Status(args) => status::execute(args, &config, &registry, &output),
    }
}

/// Report business-rule rejections and carry on; propagate everything else
fn settle(error: RelatosError, registry: &FileRegistry, output: &OutputWriter) -> Result<()> {
    if error.is_rejection() {
        tracing::debug!(%error, "Rejected");
        output.rejection(&errors::from_rejection(&error, registry.center()));
        Ok(())
    } else {
        Err(error.into())
    }
}
