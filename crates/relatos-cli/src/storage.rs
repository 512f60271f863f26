use crate::output::OutputWriter;
use relatos_core::config::RegistrySettings;
use relatos_registry::Registry;
use relatos_store::{JsonReportStore, JsonReporterStore};

/// Registry backed by the two JSON files
pub type FileRegistry = Registry<JsonReporterStore, JsonReportStore>;

/// Open the file-backed registry, warning about any store that could not be read
pub fn open_registry(settings: &RegistrySettings, output: &OutputWriter) -> FileRegistry {
    let registry = Registry::open(settings);
    let status = registry.storage_status();

    for state in [&status.reporters, &status.reports] {
        if state.status.is_unreadable() {
            output.warning(format!(
                "{} is {}. It will be overwritten on the next successful write.",
                state.location, state.status
            ));
        }
    }

    registry
}
