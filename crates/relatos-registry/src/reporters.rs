use relatos_core::error::{RelatosError, Result};
use relatos_core::models::{Reporter, ReporterMap};
use relatos_store::ports::{LoadStatus, Loaded, ReporterStore};

/// Reporters keyed by document, kept in sync with a [`ReporterStore`]
pub struct ReporterBook<S: ReporterStore> {
    reporters: ReporterMap,
    store: S,
    status: LoadStatus,
}

impl<S: ReporterStore> ReporterBook<S> {
    /// Hydrate from the store
    pub fn open(store: S) -> Self {
        let Loaded { records, status } = store.load();
        Self { reporters: records, store, status }
    }

    /// Register a new reporter and persist the whole mapping.
    ///
    /// Fails with `DuplicateDocument` if the document is taken, leaving the
    /// existing record as it was. If the save fails the insert is undone.
    pub fn register(&mut self, reporter: Reporter) -> Result<()> {
        if reporter.document.trim().is_empty() {
            return Err(RelatosError::InvalidReporter {
                reason: "document must not be empty".to_string(),
            });
        }

        if !reporter.location.is_finite() {
            return Err(RelatosError::InvalidReporter {
                reason: format!("location {} must be finite", reporter.location),
            });
        }

        if self.reporters.contains_key(&reporter.document) {
            return Err(RelatosError::DuplicateDocument { document: reporter.document });
        }

        let document = reporter.document.clone();
        self.reporters.insert(document.clone(), reporter);

        if let Err(e) = self.store.save(&self.reporters) {
            self.reporters.remove(&document);
            return Err(e);
        }

        tracing::info!(document = %document, "Registered reporter");
        Ok(())
    }

    pub fn get(&self, document: &str) -> Option<&Reporter> {
        self.reporters.get(document)
    }

    pub fn contains(&self, document: &str) -> bool {
        self.reporters.contains_key(document)
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    /// Reporters ordered by document
    pub fn iter(&self) -> impl Iterator<Item = &Reporter> {
        self.reporters.values()
    }

    pub fn as_map(&self) -> &ReporterMap {
        &self.reporters
    }

    /// How the persisted state looked when this book was opened
    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
