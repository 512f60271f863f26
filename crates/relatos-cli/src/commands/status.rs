//! Status command implementation

use crate::cli::StatusArgs;
use crate::output::OutputWriter;
use crate::output_types::{count_types, ConfigEntry, StatusOutput};
use crate::storage::FileRegistry;
use anyhow::Result;
use relatos_core::config::LayeredConfig;

pub fn execute(
    args: StatusArgs,
    config: &LayeredConfig,
    registry: &FileRegistry,
    output: &OutputWriter,
) -> Result<()> {
    let storage = registry.storage_status();
    let types = count_types(registry.reports().iter());

    if output.is_json() {
        let config = config
            .to_inspection_map()
            .into_iter()
            .map(|(key, (value, source))| ConfigEntry { key, value, source })
            .collect();

        return output.result(StatusOutput {
            config,
            storage,
            reporter_count: registry.reporters().len(),
            report_count: registry.reports().len(),
            report_types: args.verbose.then_some(types),
        });
    }

    output.section("Configuration");
    for (key, (value, source)) in config.to_inspection_map() {
        output.kv(key, format!("{} ({:?})", value, source));
    }

    output.section("Storage");
    output.kv("Reporters", format!("{}: {}", storage.reporters.location, storage.reporters.status));
    output.kv("Reports", format!("{}: {}", storage.reports.location, storage.reports.status));

    output.section("Registry");
    output.kv("Reporters", registry.reporters().len());
    output.kv("Reports", registry.reports().len());

    if args.verbose {
        output.section("Reports by Type");
        output.table(types);
    }

    Ok(())
}
