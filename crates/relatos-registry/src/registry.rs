use relatos_core::config::RegistrySettings;
use relatos_core::error::{RelatosError, Result};
use relatos_core::models::{parse_date, Coordinate, Report, ReportDraft, Reporter};
use relatos_geo::within_radius;
use relatos_store::ports::{LoadStatus, ReportStore, ReporterStore};
use relatos_store::{JsonReportStore, JsonReporterStore};
use serde::Serialize;

use crate::reporters::ReporterBook;
use crate::reports::ReportLog;

/// Load state of one store
#[derive(Debug, Clone, Serialize)]
pub struct StoreState {
    pub location: String,
    pub status: LoadStatus,
}

/// Load state of both stores, as found when the registry was opened
#[derive(Debug, Clone, Serialize)]
pub struct StorageStatus {
    pub reporters: StoreState,
    pub reports: StoreState,
}

impl StorageStatus {
    /// Whether either store had state on disk that could not be read
    pub fn has_unreadable(&self) -> bool {
        self.reporters.status.is_unreadable() || self.reports.status.is_unreadable()
    }
}

/// Incident registry: reporters, radius-gated reports, and lookups.
///
/// The central point and acceptance radius are fixed at construction.
pub struct Registry<R, P>
where
    R: ReporterStore,
    P: ReportStore,
{
    center: Coordinate,
    radius_km: f64,
    reporters: ReporterBook<R>,
    reports: ReportLog<P>,
}

impl Registry<JsonReporterStore, JsonReportStore> {
    /// Open a registry backed by the JSON files named in `settings`
    pub fn open(settings: &RegistrySettings) -> Self {
        Self::new(
            settings.center,
            settings.radius_km,
            JsonReporterStore::new(&settings.reporters_file),
            JsonReportStore::new(&settings.reports_file),
        )
    }
}

impl<R, P> Registry<R, P>
where
    R: ReporterStore,
    P: ReportStore,
{
    /// Create a registry and hydrate it from both stores
    pub fn new(center: Coordinate, radius_km: f64, reporter_store: R, report_store: P) -> Self {
        let reporters = ReporterBook::open(reporter_store);
        let reports = ReportLog::open(report_store);

        tracing::debug!(
            reporters = reporters.len(),
            reports = reports.len(),
            %center,
            radius_km,
            "Opened registry"
        );

        Self { center, radius_km, reporters, reports }
    }

    /// Register a reporter. The caller supplies the document.
    pub fn register_reporter(&mut self, reporter: Reporter) -> Result<()> {
        self.reporters.register(reporter)
    }

    /// Register a report on behalf of the reporter with `reporter_document`.
    ///
    /// The report carries a snapshot of the reporter as it is now, and is
    /// only stored if it lies within the acceptance radius.
    pub fn register_report(&mut self, draft: ReportDraft, reporter_document: &str) -> Result<&Report> {
        let snapshot = self
            .reporters
            .get(reporter_document)
            .map(Reporter::snapshot)
            .ok_or_else(|| RelatosError::ReporterNotFound {
                document: reporter_document.to_string(),
            })?;

        let report = draft.into_report(Some(snapshot));
        self.reports.append_if_valid(report, self.center, self.radius_km)
    }

    /// Reports whose type matches `kind`, ignoring case
    pub fn find_by_type(&self, kind: &str) -> impl Iterator<Item = &Report> + '_ {
        let wanted = kind.to_lowercase();
        self.reports.iter().filter(move |report| report.kind.to_lowercase() == wanted)
    }

    /// Reports dated within `[start, end]`, both `YYYY-MM-DD` and inclusive.
    ///
    /// Reversed bounds match nothing. Stored reports whose own date is not
    /// a valid calendar date are skipped.
    pub fn find_by_period(
        &self,
        start: &str,
        end: &str,
    ) -> Result<impl Iterator<Item = &Report> + '_> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;

        Ok(self.reports.iter().filter(move |report| match report.calendar_date() {
            Some(date) => start <= date && date <= end,
            None => {
                tracing::debug!(date = %report.date, "Skipping report with malformed date");
                false
            }
        }))
    }

    /// Reports within `radius_km` of `reference`
    pub fn find_by_location(
        &self,
        reference: Coordinate,
        radius_km: f64,
    ) -> impl Iterator<Item = &Report> + '_ {
        self.reports
            .iter()
            .filter(move |report| within_radius(report.location, reference, radius_km))
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn reporters(&self) -> &ReporterBook<R> {
        &self.reporters
    }

    pub fn reports(&self) -> &ReportLog<P> {
        &self.reports
    }

    pub fn storage_status(&self) -> StorageStatus {
        StorageStatus {
            reporters: StoreState {
                location: self.reporters.store().describe(),
                status: self.reporters.load_status().clone(),
            },
            reports: StoreState {
                location: self.reports.store().describe(),
                status: self.reports.load_status().clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use relatos_store::{MemoryReportStore, MemoryReporterStore};

    const CENTER: Coordinate = Coordinate { lat: -23.55, lon: -46.63 };

    type MemoryRegistry = Registry<MemoryReporterStore, MemoryReportStore>;

    fn registry() -> MemoryRegistry {
        Registry::new(CENTER, 10.0, MemoryReporterStore::new(), MemoryReportStore::new())
    }

    fn ana() -> Reporter {
        Reporter::new("Ana", "123", "ana@example.com", "11999990000", CENTER)
    }

    fn draft(kind: &str, date: &str, location: Coordinate) -> ReportDraft {
        ReportDraft::new(kind, "desc", date, "12:00", location)
    }

    fn seeded(reports: &[(&str, &str)]) -> MemoryRegistry {
        let mut registry = registry();
        registry.register_reporter(ana()).unwrap();
        for (kind, date) in reports {
            registry.register_report(draft(kind, date, CENTER), "123").unwrap();
        }
        registry
    }

    fn kinds<'a>(reports: impl Iterator<Item = &'a Report>) -> Vec<String> {
        reports.map(|r| format!("{}@{}", r.kind, r.date)).collect()
    }

    #[test]
    fn test_register_report_embeds_reporter_snapshot() {
        let mut registry = registry();
        registry.register_reporter(ana()).unwrap();

        let report = registry.register_report(draft("Flood", "2024-01-10", CENTER), "123").unwrap();

        assert_eq!(report.reporter, Some(ana().snapshot()));
        assert_eq!(registry.reports().len(), 1);
    }

    #[test]
    fn test_register_report_unknown_reporter() {
        let mut registry = registry();

        let result = registry.register_report(draft("Flood", "2024-01-10", CENTER), "999");

        assert!(matches!(result, Err(RelatosError::ReporterNotFound { document }) if document == "999"));
        assert!(registry.reports().is_empty());
    }

    #[test]
    fn test_register_report_out_of_radius() {
        let mut registry = registry();
        registry.register_reporter(ana()).unwrap();

        let result = registry.register_report(draft("Flood", "2024-01-10", Coordinate::new(0.0, 0.0)), "123");

        assert!(matches!(result, Err(RelatosError::OutOfRadius { .. })));
        assert_eq!(registry.reports().len(), 0);
    }

    #[test]
    fn test_find_by_type_ignores_case() {
        let registry = seeded(&[("Fire", "2024-01-01"), ("Flood", "2024-01-02"), ("FIRE", "2024-01-03")]);

        let upper = kinds(registry.find_by_type("Fire"));
        let lower = kinds(registry.find_by_type("fire"));

        assert_eq!(upper, lower);
        assert_eq!(upper, vec!["Fire@2024-01-01", "FIRE@2024-01-03"]);
        assert_eq!(registry.find_by_type("Earthquake").count(), 0);
    }

    #[test]
    fn test_find_by_type_is_exact_match() {
        let registry = seeded(&[("Forest Fire", "2024-01-01")]);
        assert_eq!(registry.find_by_type("fire").count(), 0);
    }

    #[test]
    fn test_find_by_type_rescans_current_data() {
        let mut registry = seeded(&[("Fire", "2024-01-01")]);
        assert_eq!(registry.find_by_type("fire").count(), 1);

        registry.register_report(draft("fire", "2024-01-02", CENTER), "123").unwrap();
        assert_eq!(registry.find_by_type("fire").count(), 2);
    }

    #[test]
    fn test_find_by_period_inclusive_bounds() {
        let registry = seeded(&[
            ("Flood", "2023-12-31"),
            ("Flood", "2024-01-01"),
            ("Flood", "2024-01-31"),
            ("Flood", "2024-02-01"),
        ]);

        let found = kinds(registry.find_by_period("2024-01-01", "2024-01-31").unwrap());
        assert_eq!(found, vec!["Flood@2024-01-01", "Flood@2024-01-31"]);
    }

    #[test]
    fn test_find_by_period_compares_dates_not_strings() {
        // "2024-1-5" sorts after "2024-01-31" as a string but is January 5th
        let registry = seeded(&[("Flood", "2024-1-5")]);
        assert_eq!(registry.find_by_period("2024-01-01", "2024-01-31").unwrap().count(), 1);
    }

    #[test]
    fn test_find_by_period_reversed_bounds_is_empty() {
        let registry = seeded(&[("Flood", "2024-01-10")]);
        assert_eq!(registry.find_by_period("2024-01-31", "2024-01-01").unwrap().count(), 0);
    }

    #[test]
    fn test_find_by_period_invalid_bounds() {
        let registry = seeded(&[("Flood", "2024-01-10")]);

        assert!(matches!(
            registry.find_by_period("01/01/2024", "2024-01-31").map(|it| it.count()),
            Err(RelatosError::InvalidDateFormat { value }) if value == "01/01/2024"
        ));
        assert!(matches!(
            registry.find_by_period("2024-01-01", "fim").map(|it| it.count()),
            Err(RelatosError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_find_by_period_skips_malformed_stored_dates() {
        let registry = seeded(&[("Flood", "ontem"), ("Fire", "2024-01-10")]);
        let found = kinds(registry.find_by_period("2024-01-01", "2024-01-31").unwrap());
        assert_eq!(found, vec!["Fire@2024-01-10"]);
    }

    #[test]
    fn test_find_by_location() {
        let mut registry = Registry::new(CENTER, 50.0, MemoryReporterStore::new(), MemoryReportStore::new());
        registry.register_reporter(ana()).unwrap();
        registry.register_report(draft("Near", "2024-01-10", CENTER), "123").unwrap();
        // ~22km north of the center
        registry
            .register_report(draft("Far", "2024-01-10", Coordinate::new(-23.35, -46.63)), "123")
            .unwrap();

        let near = kinds(registry.find_by_location(CENTER, 5.0));
        assert_eq!(near, vec!["Near@2024-01-10"]);

        let both = kinds(registry.find_by_location(CENTER, 30.0));
        assert_eq!(both, vec!["Near@2024-01-10", "Far@2024-01-10"]);

        assert_eq!(registry.find_by_location(Coordinate::new(0.0, 0.0), 10.0).count(), 0);
    }

    #[test]
    fn test_storage_status_for_fresh_registry() {
        let status = registry().storage_status();
        assert_eq!(status.reporters.location, "memory");
        assert_eq!(status.reporters.status, LoadStatus::Missing);
        assert_eq!(status.reports.status, LoadStatus::Missing);
        assert!(!status.has_unreadable());
    }

    proptest! {
        #[test]
        fn prop_find_by_type_case_insensitive(kind in "[a-zA-Z]{1,12}") {
            let registry = seeded(&[(kind.as_str(), "2024-01-10"), ("other-kind", "2024-01-10")]);

            let upper = kinds(registry.find_by_type(&kind.to_uppercase()));
            let lower = kinds(registry.find_by_type(&kind.to_lowercase()));

            prop_assert_eq!(upper.len(), 1);
            prop_assert_eq!(upper, lower);
        }
    }
}
