use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Coordinate, ReporterSnapshot};
use crate::error::{RelatosError, Result};

/// Calendar date format used for report dates and period bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RelatosError::InvalidDateFormat { value: value.to_string() })
}

/// A single incident observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Report {
    /// Incident type, e.g. "Flood"
    #[serde(rename = "tipo")]
    pub kind: String,

    #[serde(rename = "descricao")]
    pub description: String,

    /// Date as `YYYY-MM-DD`
    #[serde(rename = "data")]
    pub date: String,

    /// Free-form time of day
    #[serde(rename = "hora")]
    pub time: String,

    #[serde(rename = "localizacao")]
    pub location: Coordinate,

    /// Reporter fields as they were when the report was registered
    #[serde(rename = "relator", default)]
    pub reporter: Option<ReporterSnapshot>,
}

impl Report {
    /// The report date as a calendar date, if it is well formed
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date).ok()
    }
}

/// Report fields supplied at registration, before a reporter is attached
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDraft {
    pub kind: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: Coordinate,
}

impl ReportDraft {
    pub fn new(
        kind: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        location: Coordinate,
    ) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            date: date.into(),
            time: time.into(),
            location,
        }
    }

    pub fn into_report(self, reporter: Option<ReporterSnapshot>) -> Report {
        Report {
            kind: self.kind,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            reporter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reporter;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-10").unwrap(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(matches!(
            parse_date("10/01/2024"),
            Err(RelatosError::InvalidDateFormat { value }) if value == "10/01/2024"
        ));
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_report_wire_format() {
        let reporter = Reporter::new("Ana", "123", "a@b.c", "1", Coordinate::new(-23.55, -46.63));
        let report = ReportDraft::new("Flood", "Rua alagada", "2024-01-10", "14:30", Coordinate::new(-23.55, -46.63))
            .into_report(Some(reporter.snapshot()));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["tipo"], "Flood");
        assert_eq!(value["descricao"], "Rua alagada");
        assert_eq!(value["data"], "2024-01-10");
        assert_eq!(value["hora"], "14:30");
        assert_eq!(value["localizacao"], serde_json::json!([-23.55, -46.63]));
        assert_eq!(value["relator"]["documento"], "123");
    }

    #[test]
    fn test_absent_reporter_is_null() {
        let report = ReportDraft::new("Fire", "", "2024-01-10", "", Coordinate::new(0.0, 0.0)).into_report(None);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["relator"].is_null());
    }

    #[test]
    fn test_missing_reporter_key_decodes_as_none() {
        let json = r#"{"tipo":"Fire","descricao":"x","data":"2024-01-10","hora":"10:00","localizacao":[0,0]}"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert!(report.reporter.is_none());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{"tipo":"Fire","descricao":"x","data":"2024-01-10","hora":"10:00","localizacao":[0,0],"relator":null,"extra":1}"#;
        assert!(serde_json::from_str::<Report>(json).is_err());
    }

    #[test]
    fn test_calendar_date() {
        let mut report = ReportDraft::new("Fire", "", "2024-01-10", "", Coordinate::new(0.0, 0.0)).into_report(None);
        assert!(report.calendar_date().is_some());
        report.date = "ontem".to_string();
        assert!(report.calendar_date().is_none());
    }
}
