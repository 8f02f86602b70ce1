//! `import` subcommand: build a data file from the CSV sources.

use anyhow::Context;
use clim_db::Database;
use log::info;
use std::path::Path;
use tempfile::NamedTempFile;

/// Create `database` and load both CSV files into it.
///
/// Refuses to touch an existing file unless `force` is set, in which case
/// the file is replaced. The data is built in a temporary file beside
/// `database` and only renamed into place once both loads succeed, so a
/// failed import leaves the previous file (or no file) behind.
pub fn run_import(
    stations_csv: &Path,
    measurements_csv: &Path,
    database: &Path,
    force: bool,
) -> anyhow::Result<()> {
    let stations = std::fs::read_to_string(stations_csv)
        .with_context(|| format!("Failed to read {}", stations_csv.display()))?;
    let measurements = std::fs::read_to_string(measurements_csv)
        .with_context(|| format!("Failed to read {}", measurements_csv.display()))?;

    if database.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to replace it.",
            database.display()
        );
    }
    let parent = match database.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
            parent
        }
        None => Path::new("."),
    };

    // Dropped (and deleted) on every early return below.
    let staging = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create a temporary file in {}", parent.display()))?;
    let (station_summary, measurement_summary) = {
        let db = Database::create(staging.path())?;
        let station_summary = db.load_stations(&stations)?;
        let measurement_summary = db.load_measurements(&measurements)?;
        (station_summary, measurement_summary)
    };
    staging
        .persist(database)
        .with_context(|| format!("Failed to move the new data into {}", database.display()))?;

    info!(
        "Import complete: {} stations, {} measurements ({} skipped) written to {}",
        station_summary.inserted,
        measurement_summary.inserted,
        measurement_summary.skipped,
        database.display()
    );
    Ok(())
}
