use relatos_core::error::{RelatosError, Result};
use relatos_core::models::{Coordinate, Report};
use relatos_geo::{distance_km, within_radius};
use relatos_store::ports::{LoadStatus, Loaded, ReportStore};

/// Reports in insertion order, kept in sync with a [`ReportStore`]
pub struct ReportLog<S: ReportStore> {
    reports: Vec<Report>,
    store: S,
    status: LoadStatus,
}

impl<S: ReportStore> ReportLog<S> {
    /// Hydrate from the store
    pub fn open(store: S) -> Self {
        let Loaded { records, status } = store.load();
        Self { reports: records, store, status }
    }

    /// Append `report` if it lies within `radius_km` of `center`, then persist.
    ///
    /// On `OutOfRadius` nothing is mutated and nothing is written. If the
    /// save fails the append is undone.
    pub fn append_if_valid(
        &mut self,
        report: Report,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<&Report> {
        if !within_radius(report.location, center, radius_km) {
            return Err(RelatosError::OutOfRadius {
                distance_km: distance_km(report.location, center),
                radius_km,
            });
        }

        self.reports.push(report);

        if let Err(e) = self.store.save(&self.reports) {
            self.reports.pop();
            return Err(e);
        }

        let index = self.reports.len() - 1;
        tracing::info!(index, kind = %self.reports[index].kind, "Registered report");
        Ok(&self.reports[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Report> {
        self.reports.iter()
    }

    pub fn as_slice(&self) -> &[Report] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// How the persisted state looked when this log was opened
    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
