//! buscar_por_tipo, buscar_por_periodo, buscar_por_localizacao

use crate::cli::{SearchByLocationArgs, SearchByPeriodArgs, SearchByTypeArgs};
use crate::output::OutputWriter;
use crate::output_types::{SearchCriteria, SearchOutput};
use crate::storage::FileRegistry;
use anyhow::Result;
use relatos_core::models::{Coordinate, Report};

pub fn by_type(args: SearchByTypeArgs, registry: &FileRegistry, output: &OutputWriter) -> Result<()> {
    let reports: Vec<Report> = registry.find_by_type(&args.kind).cloned().collect();
    show(SearchCriteria::Type { kind: args.kind }, reports, output)
}

pub fn by_period(args: SearchByPeriodArgs, registry: &FileRegistry, output: &OutputWriter) -> Result<()> {
    let reports: Vec<Report> = match registry.find_by_period(&args.start, &args.end) {
        Ok(found) => found.cloned().collect(),
        Err(e) => return super::settle(e, registry, output),
    };
    show(SearchCriteria::Period { start: args.start, end: args.end }, reports, output)
}

pub fn by_location(
    args: SearchByLocationArgs,
    registry: &FileRegistry,
    output: &OutputWriter,
) -> Result<()> {
    let reference = Coordinate::new(args.lat, args.long);
    let reports: Vec<Report> = registry.find_by_location(reference, args.radius_km).cloned().collect();
    show(SearchCriteria::Location { reference, radius_km: args.radius_km }, reports, output)
}

fn show(criteria: SearchCriteria, reports: Vec<Report>, output: &OutputWriter) -> Result<()> {
    if output.is_json() {
        return output.result(SearchOutput { criteria, count: reports.len(), reports });
    }

    if reports.is_empty() {
        output.info("No reports found");
        return Ok(());
    }

    for report in &reports {
        output.report(report);
    }
    output.info(format!("{} report(s) found", reports.len()));
    Ok(())
}
