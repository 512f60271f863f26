use clap::{Parser, Subcommand};
use relatos_core::config::{parse_center, parse_radius};
use relatos_core::models::Coordinate;
use std::path::PathBuf;

/// Relatos - Local incident report registry
#[derive(Parser, Debug)]
#[command(name = "relatos")]
#[command(about = "Local incident report registry", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./relatos.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reporter file to read and write
    #[arg(long, global = true, value_name = "PATH")]
    pub reporters_file: Option<PathBuf>,

    /// Report file to read and write
    #[arg(long, global = true, value_name = "PATH")]
    pub reports_file: Option<PathBuf>,

    /// Central point new reports must be near, as "lat,long"
    #[arg(long, global = true, value_name = "LAT,LONG", allow_hyphen_values = true, value_parser = center_arg)]
    pub center: Option<Coordinate>,

    /// Acceptance radius around the central point, in kilometers
    #[arg(long, global = true, value_name = "KM", value_parser = radius_arg)]
    pub radius_km: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a reporter
    #[command(name = "adicionar_relator", alias = "adicionar-relator")]
    AddReporter(AddReporterArgs),

    /// Register an incident report for an existing reporter
    #[command(name = "adicionar_relato", alias = "adicionar-relato")]
    AddReport(AddReportArgs),

    /// List reports of a given type
    #[command(name = "buscar_por_tipo", alias = "buscar-por-tipo")]
    SearchByType(SearchByTypeArgs),

    /// List reports dated within a period
    #[command(name = "buscar_por_periodo", alias = "buscar-por-periodo")]
    SearchByPeriod(SearchByPeriodArgs),

    /// List reports near a point
    #[command(name = "buscar_por_localizacao", alias = "buscar-por-localizacao")]
    SearchByLocation(SearchByLocationArgs),

    /// Show configuration and storage status
    Status(StatusArgs),
}

#[derive(Parser, Debug)]
pub struct AddReporterArgs {
    /// Reporter name
    #[arg(value_name = "NOME")]
    pub name: String,

    /// Unique document identifier
    #[arg(value_name = "DOCUMENTO")]
    pub document: String,

    #[arg(value_name = "EMAIL")]
    pub email: String,

    #[arg(value_name = "TELEFONE")]
    pub phone: String,

    /// Latitude in decimal degrees
    #[arg(value_name = "LAT", allow_negative_numbers = true, value_parser = degrees_arg)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(value_name = "LONG", allow_negative_numbers = true, value_parser = degrees_arg)]
    pub long: f64,
}

#[derive(Parser, Debug)]
pub struct AddReportArgs {
    /// Incident type, e.g. "Flood"
    #[arg(value_name = "TIPO")]
    pub kind: String,

    #[arg(value_name = "DESCRICAO")]
    pub description: String,

    /// Date as YYYY-MM-DD
    #[arg(value_name = "DATA")]
    pub date: String,

    /// Time of day, e.g. 14:30
    #[arg(value_name = "HORA")]
    pub time: String,

    /// Latitude in decimal degrees
    #[arg(value_name = "LAT", allow_negative_numbers = true, value_parser = degrees_arg)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(value_name = "LONG", allow_negative_numbers = true, value_parser = degrees_arg)]
    pub long: f64,

    /// Document of the registered reporter
    #[arg(value_name = "DOCUMENTO_RELATOR")]
    pub reporter_document: String,
}

#[derive(Parser, Debug)]
pub struct SearchByTypeArgs {
    /// Incident type (case-insensitive)
    #[arg(value_name = "TIPO")]
    pub kind: String,
}

#[derive(Parser, Debug)]
pub struct SearchByPeriodArgs {
    /// First day of the period, YYYY-MM-DD (inclusive)
    #[arg(value_name = "DATA_INICIO")]
    pub start: String,

    /// Last day of the period, YYYY-MM-DD (inclusive)
    #[arg(value_name = "DATA_FIM")]
    pub end: String,
}

#[derive(Parser, Debug)]
pub struct SearchByLocationArgs {
    /// Latitude of the reference point
    #[arg(value_name = "LAT", allow_negative_numbers = true, value_parser = degrees_arg)]
    pub lat: f64,

    /// Longitude of the reference point
    #[arg(value_name = "LONG", allow_negative_numbers = true, value_parser = degrees_arg)]
    pub long: f64,

    /// Search radius in kilometers
    #[arg(value_name = "RAIO_KM", value_parser = search_radius_arg)]
    pub radius_km: f64,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Show the report count for each incident type
    #[arg(long)]
    pub verbose: bool,
}

fn degrees_arg(s: &str) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", s));
    }
    Ok(value)
}

fn search_radius_arg(s: &str) -> Result<f64, String> {
    let value = degrees_arg(s)?;
    if value < 0.0 {
        return Err(format!("radius must not be negative, got {}", value));
    }
    Ok(value)
}

fn center_arg(s: &str) -> Result<Coordinate, String> {
    parse_center(s).map_err(|e| e.to_string())
}

fn radius_arg(s: &str) -> Result<f64, String> {
    parse_radius(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_coordinates_parse_as_positionals() {
        let cli = Cli::try_parse_from([
            "relatos",
            "adicionar_relator",
            "Ana",
            "123",
            "ana@example.com",
            "11999990000",
            "-23.55",
            "-46.63",
        ])
        .unwrap();

        match cli.command {
            Commands::AddReporter(args) => {
                assert_eq!(args.document, "123");
                assert_eq!(args.lat, -23.55);
                assert_eq!(args.long, -46.63);
            }
            other => panic!("Expected AddReporter, got {:?}", other),
        }
    }

    #[test]
    fn test_hyphenated_alias() {
        let cli = Cli::try_parse_from(["relatos", "buscar-por-tipo", "Flood"]).unwrap();
        assert!(matches!(cli.command, Commands::SearchByType(args) if args.kind == "Flood"));
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::try_parse_from([
            "relatos",
            "--center",
            "-22.9,-43.17",
            "--radius-km",
            "25",
            "status",
        ])
        .unwrap();

        assert_eq!(cli.center, Some(Coordinate::new(-22.9, -43.17)));
        assert_eq!(cli.radius_km, Some(25.0));
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let result = Cli::try_parse_from(["relatos", "buscar_por_localizacao", "NaN", "0", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_search_radius() {
        let result = Cli::try_parse_from(["relatos", "buscar_por_localizacao", "0", "0", "-5"]);
        assert!(result.is_err());
    }
}
