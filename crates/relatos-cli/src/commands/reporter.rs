//! adicionar_relator

use crate::cli::AddReporterArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::ReporterOutput;
use crate::storage::FileRegistry;
use anyhow::{Context, Result};
use relatos_core::models::{Coordinate, Reporter};
use relatos_core::RelatosError;
use relatos_geo::validation::validate_coordinate;

pub fn execute(args: AddReporterArgs, registry: &mut FileRegistry, output: &OutputWriter) -> Result<()> {
    let location = Coordinate::new(args.lat, args.long);
    let validation = validate_coordinate(&location);
    if !validation.is_valid {
        output.warning(format!("Unusual reporter location: {}", validation.summary()));
    }

    let reporter = Reporter::new(args.name, args.document, args.email, args.phone, location);
    let summary = ReporterOutput::from(&reporter);

    match registry.register_reporter(reporter) {
        Ok(()) => {
            if output.is_json() {
                output.result(summary)?;
            } else {
                output.success(format!(
                    "Reporter {} registered with document {}",
                    summary.name, summary.document
                ));
            }
            Ok(())
        }
        Err(RelatosError::DuplicateDocument { document }) => {
            // Name the reporter already on file, not the one just rejected
            let existing = registry
                .reporters()
                .get(&document)
                .map(|r| r.name.clone())
                .unwrap_or_default();
            output.rejection(&errors::duplicate_reporter(&existing, &document));
            Ok(())
        }
        Err(e) if e.is_rejection() => super::settle(e, registry, output),
        Err(e) => Err(e).context("Failed to save reporters"),
    }
}
