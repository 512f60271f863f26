//! JSON-file storage adapters.
//!
//! Each store owns one file and rewrites it whole on every save. Writes go to
//! a temporary file in the same directory which is then renamed over the
//! target, so an interrupted save leaves the previous contents in place.

use relatos_core::error::{RelatosError, Result};
use relatos_core::models::{Report, ReporterMap};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::ports::{LoadStatus, Loaded, ReportStore, ReporterStore};

/// Reporter mapping persisted as a JSON object keyed by document
#[derive(Debug, Clone)]
pub struct JsonReporterStore {
    path: PathBuf,
}

impl JsonReporterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<Option<ReporterMap>> {
        let Some(reporters) = read_json::<ReporterMap>(&self.path)? else {
            return Ok(None);
        };

        for (key, reporter) in &reporters {
            if reporter.document.trim().is_empty() {
                return Err(unreadable(&self.path, format!("reporter '{}' has an empty document", key)));
            }
            if *key != reporter.document {
                return Err(unreadable(
                    &self.path,
                    format!("key '{}' does not match document '{}'", key, reporter.document),
                ));
            }
        }

        Ok(Some(reporters))
    }
}

impl ReporterStore for JsonReporterStore {
    fn load(&self) -> Loaded<ReporterMap> {
        settle(&self.path, self.read(), |reporters| reporters.len())
    }

    fn save(&self, reporters: &ReporterMap) -> Result<()> {
        write_json(&self.path, reporters)?;
        tracing::debug!(path = %self.path.display(), count = reporters.len(), "Saved reporters");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Report sequence persisted as a JSON array in insertion order
#[derive(Debug, Clone)]
pub struct JsonReportStore {
    path: PathBuf,
}

impl JsonReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportStore for JsonReportStore {
    fn load(&self) -> Loaded<Vec<Report>> {
        settle(&self.path, read_json::<Vec<Report>>(&self.path), |reports| reports.len())
    }

    fn save(&self, reports: &[Report]) -> Result<()> {
        write_json(&self.path, reports)?;
        tracing::debug!(path = %self.path.display(), count = reports.len(), "Saved reports");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn unreadable(path: &Path, reason: impl Into<String>) -> RelatosError {
    RelatosError::StorageUnreadable { path: path.to_path_buf(), reason: reason.into() }
}

/// Read and decode a JSON file. `Ok(None)` when there is nothing to read.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(unreadable(path, e.to_string())),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&content).map(Some).map_err(|e| unreadable(path, e.to_string()))
}

/// Turn a read result into a load outcome, logging anything unusual
fn settle<T: Default>(
    path: &Path,
    result: Result<Option<T>>,
    count: impl Fn(&T) -> usize,
) -> Loaded<T> {
    match result {
        Ok(Some(records)) => {
            let records_len = count(&records);
            tracing::debug!(path = %path.display(), count = records_len, "Loaded records");
            Loaded { records, status: LoadStatus::Loaded { records: records_len } }
        }
        Ok(None) => {
            tracing::debug!(path = %path.display(), "No persisted records, starting empty");
            Loaded::missing()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Storage unreadable, starting empty");
            Loaded::unreadable(e.to_string())
        }
    }
}

/// Serialize `value` with four-space indentation and atomically replace `path`
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    {
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut file, PrettyFormatter::with_indent(b"    "));
        value
            .serialize(&mut serializer)
            .map_err(|e| RelatosError::Serialization(e.to_string()))?;
    }
    file.flush()?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
