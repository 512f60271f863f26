//! adicionar_relato

use crate::cli::AddReportArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::ReportOutput;
use crate::storage::FileRegistry;
use anyhow::{Context, Result};
use relatos_core::models::{parse_date, Coordinate, ReportDraft};
use relatos_geo::distance_km;
use relatos_geo::validation::validate_coordinate;

pub fn execute(args: AddReportArgs, registry: &mut FileRegistry, output: &OutputWriter) -> Result<()> {
    // Stored dates must stay comparable for period searches
    if parse_date(&args.date).is_err() {
        output.rejection(&errors::invalid_date(&args.date));
        return Ok(());
    }

    let location = Coordinate::new(args.lat, args.long);
    let validation = validate_coordinate(&location);
    if !validation.is_valid {
        output.warning(format!("Unusual report location: {}", validation.summary()));
    }

    let draft = ReportDraft::new(args.kind, args.description, args.date, args.time, location);
    let center = registry.center();

    let report = match registry.register_report(draft, &args.reporter_document) {
        Ok(report) => report.clone(),
        Err(e) if e.is_rejection() => return super::settle(e, registry, output),
        Err(e) => return Err(e).context("Failed to save reports"),
    };

    if output.is_json() {
        output.result(ReportOutput {
            distance_km: distance_km(report.location, center),
            total_reports: registry.reports().len(),
            report,
        })?;
    } else {
        output.success(format!("{} report registered", report.kind));
        output.report(&report);
    }

    Ok(())
}
