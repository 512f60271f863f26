//! In-memory storage implementations for development and testing.
//!
//! Clones share state, so a test can keep a handle to a store it has given
//! to a registry and inspect what was saved. Saves can be made to fail to
//! exercise error paths.

use relatos_core::error::{RelatosError, Result};
use relatos_core::models::{Report, ReporterMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{LoadStatus, Loaded, ReportStore, ReporterStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn write_failure() -> RelatosError {
    RelatosError::Io(std::io::Error::other("in-memory store configured to fail saves"))
}

/// Shared bookkeeping for the in-memory stores
#[derive(Debug, Default)]
struct SaveControl {
    fail: AtomicBool,
    count: AtomicUsize,
}

impl SaveControl {
    fn begin(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(write_failure());
        }
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory implementation of ReporterStore
#[derive(Debug, Clone, Default)]
pub struct MemoryReporterStore {
    reporters: Arc<Mutex<Option<ReporterMap>>>,
    control: Arc<SaveControl>,
}

impl MemoryReporterStore {
    /// Create an empty in-memory reporter store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `reporters`
    pub fn with_reporters(reporters: ReporterMap) -> Self {
        let store = Self::default();
        *lock(&store.reporters) = Some(reporters);
        store
    }

    /// Currently persisted reporters, if anything was ever saved
    pub fn persisted(&self) -> Option<ReporterMap> {
        lock(&self.reporters).clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.control.count.load(Ordering::SeqCst)
    }

    /// Make subsequent saves fail with an I/O error
    pub fn fail_saves(&self, fail: bool) {
        self.control.fail.store(fail, Ordering::SeqCst);
    }
}

impl ReporterStore for MemoryReporterStore {
    fn load(&self) -> Loaded<ReporterMap> {
        match lock(&self.reporters).clone() {
            Some(records) => {
                let status = LoadStatus::Loaded { records: records.len() };
                Loaded { records, status }
            }
            None => Loaded::missing(),
        }
    }

    fn save(&self, reporters: &ReporterMap) -> Result<()> {
        self.control.begin()?;
        *lock(&self.reporters) = Some(reporters.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// In-memory implementation of ReportStore
#[derive(Debug, Clone, Default)]
pub struct MemoryReportStore {
    reports: Arc<Mutex<Option<Vec<Report>>>>,
    control: Arc<SaveControl>,
}

impl MemoryReportStore {
    /// Create an empty in-memory report store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `reports`
    pub fn with_reports(reports: Vec<Report>) -> Self {
        let store = Self::default();
        *lock(&store.reports) = Some(reports);
        store
    }

    /// Currently persisted reports, if anything was ever saved
    pub fn persisted(&self) -> Option<Vec<Report>> {
        lock(&self.reports).clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.control.count.load(Ordering::SeqCst)
    }

    /// Make subsequent saves fail with an I/O error
    pub fn fail_saves(&self, fail: bool) {
        self.control.fail.store(fail, Ordering::SeqCst);
    }
}

impl ReportStore for MemoryReportStore {
    fn load(&self) -> Loaded<Vec<Report>> {
        match lock(&self.reports).clone() {
            Some(records) => {
                let status = LoadStatus::Loaded { records: records.len() };
                Loaded { records, status }
            }
            None => Loaded::missing(),
        }
    }

    fn save(&self, reports: &[Report]) -> Result<()> {
        self.control.begin()?;
        *lock(&self.reports) = Some(reports.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
