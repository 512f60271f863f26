use relatos_core::error::Result;
use relatos_core::models::{Report, ReporterMap};
use serde::Serialize;
use std::fmt;

/// How a store's persisted state was found at load time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    /// Nothing persisted yet
    Missing,
    /// Persisted state decoded successfully
    Loaded { records: usize },
    /// Persisted state exists but could not be decoded; the store starts empty
    Unreadable { reason: String },
}

impl LoadStatus {
    pub fn is_unreadable(&self) -> bool {
        matches!(self, LoadStatus::Unreadable { .. })
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Missing => write!(f, "missing (fresh start)"),
            LoadStatus::Loaded { records } => write!(f, "loaded ({} records)", records),
            LoadStatus::Unreadable { reason } => write!(f, "unreadable, started empty ({})", reason),
        }
    }
}

/// Records produced by a load, with the status that produced them
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub records: T,
    pub status: LoadStatus,
}

impl<T: Default> Loaded<T> {
    pub fn missing() -> Self {
        Self { records: T::default(), status: LoadStatus::Missing }
    }

    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self {
            records: T::default(),
            status: LoadStatus::Unreadable { reason: reason.into() },
        }
    }
}

/// Port for reporter persistence
pub trait ReporterStore {
    /// Load every persisted reporter.
    ///
    /// Never fails: absent or unreadable state yields an empty mapping and a
    /// status saying which case occurred.
    fn load(&self) -> Loaded<ReporterMap>;

    /// Replace the persisted state with `reporters`
    fn save(&self, reporters: &ReporterMap) -> Result<()>;

    /// Where the records live, for display
    fn describe(&self) -> String;
}

/// Port for report persistence
pub trait ReportStore {
    /// Load every persisted report in insertion order.
    ///
    /// Same soft-fail policy as [`ReporterStore::load`].
    fn load(&self) -> Loaded<Vec<Report>>;

    /// Replace the persisted state with `reports`
    fn save(&self, reports: &[Report]) -> Result<()>;

    /// Where the records live, for display
    fn describe(&self) -> String;
}
