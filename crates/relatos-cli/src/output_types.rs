use relatos_core::config::ConfigSource;
use relatos_core::models::{Coordinate, Report, Reporter};
use relatos_registry::StorageStatus;
use serde::Serialize;
use tabled::Tabled;

/// Output for adicionar_relator
#[derive(Debug, Serialize)]
pub struct ReporterOutput {
    pub name: String,
    pub document: String,
    pub location: Coordinate,
}

impl From<&Reporter> for ReporterOutput {
    fn from(reporter: &Reporter) -> Self {
        Self {
            name: reporter.name.clone(),
            document: reporter.document.clone(),
            location: reporter.location,
        }
    }
}

/// Output for adicionar_relato
#[derive(Debug, Serialize)]
pub struct ReportOutput {
    pub report: Report,
    pub distance_km: f64,
    pub total_reports: usize,
}

/// Output for the buscar_* commands
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub criteria: SearchCriteria,
    pub count: usize,
    pub reports: Vec<Report>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum SearchCriteria {
    Type { kind: String },
    Period { start: String, end: String },
    Location { reference: Coordinate, radius_km: f64 },
}

/// Output for status command
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub config: Vec<ConfigEntry>,
    pub storage: StorageStatus,
    pub reporter_count: usize,
    pub report_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_types: Option<Vec<TypeCount>>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: ConfigSource,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TypeCount {
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Reports")]
    pub count: usize,
}

/// Count reports per type, ignoring case, in the order types first appear
pub fn count_types<'a>(reports: impl Iterator<Item = &'a Report>) -> Vec<TypeCount> {
    let mut counts: Vec<TypeCount> = Vec::new();

    for report in reports {
        let key = report.kind.to_lowercase();
        match counts.iter_mut().find(|c| c.kind.to_lowercase() == key) {
            Some(entry) => entry.count += 1,
            None => counts.push(TypeCount { kind: report.kind.clone(), count: 1 }),
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use relatos_core::models::ReportDraft;

    fn report(kind: &str) -> Report {
        ReportDraft::new(kind, "d", "2024-01-10", "12:00", Coordinate::new(0.0, 0.0)).into_report(None)
    }

    #[test]
    fn test_count_types_groups_case_insensitively() {
        let reports = vec![report("Flood"), report("Fire"), report("FLOOD"), report("flood")];

        let counts = count_types(reports.iter());

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].kind, "Flood");
        assert_eq!(counts[0].count, 3);
        assert_eq!(counts[1].kind, "Fire");
        assert_eq!(counts[1].count, 1);
    }

    #[test]
    fn test_search_criteria_serialization() {
        let criteria = SearchCriteria::Location {
            reference: Coordinate::new(-23.55, -46.63),
            radius_km: 5.0,
        };
        let json = serde_json::to_value(&criteria).unwrap();

        assert_eq!(json["by"], "location");
        assert_eq!(json["reference"], serde_json::json!([-23.55, -46.63]));
    }
}
