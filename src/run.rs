use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::io::excel_read;
use crate::paths::PathResolver;
use crate::sync::sync_sheet;
use crate::version::select_latest;

/// Runs a full best-effort sync pass over every class directory.
///
/// Each class and sheet is an independent unit of work: a class without a
/// versioned metadata file, an unreadable workbook, or a broken sheet is
/// logged and skipped, never aborting the run. Returns one summary line per
/// (class, sheet) pair.
#[instrument(level = "info", skip_all)]
pub fn run_all(config: &Config) -> Result<Vec<String>> {
    let classes = discover_classes(&config.metadata_dir)?;
    config.validate_label_columns(&classes);

    let resolver = PathResolver::new(config);
    let mut entries = Vec::new();

    for class_name in &classes {
        let class_dir = config.metadata_dir.join(class_name);
        let filenames = match list_filenames(&class_dir) {
            Ok(filenames) => filenames,
            Err(error) => {
                warn!(class = %class_name, %error, "failed to list class directory, skipping");
                continue;
            }
        };

        let selected = select_latest(filenames)
            .ok_or_else(|| SyncError::NoMetadataFound(class_name.clone()));
        let metadata = match selected {
            Ok(metadata) => metadata,
            Err(error) => {
                warn!(%error, "skipping class");
                continue;
            }
        };

        let metadata_path = class_dir.join(&metadata.filename);
        entries.extend(sync_class(&resolver, class_name, &metadata_path));
    }

    Ok(entries)
}

/// Synchronises every sheet of one class's selected metadata workbook,
/// returning the summary lines for the sheets that were processed.
fn sync_class(resolver: &PathResolver<'_>, class_name: &str, metadata_path: &Path) -> Vec<String> {
    let mut workbook = match excel_read::open_metadata_workbook(metadata_path) {
        Ok(workbook) => workbook,
        Err(error) => {
            warn!(class = %class_name, %error, "skipping class");
            return Vec::new();
        }
    };

    let label_column = resolver.label_column(class_name);
    let sheets = excel_read::sheet_names(&workbook);
    info!(class = %class_name, column = %label_column, ?sheets, "syncing class");

    let mut entries = Vec::new();
    for sheet_name in &sheets {
        let range = match excel_read::read_sheet(&mut workbook, sheet_name) {
            Ok(range) => range,
            Err(error) => {
                warn!(class = %class_name, sheet = %sheet_name, %error, "skipping sheet");
                continue;
            }
        };

        match sync_sheet(class_name, sheet_name, &range, label_column, resolver) {
            Ok(outcome) => entries.push(format!(
                "{class_name}:{sheet_name} -> {} synced, {} missing",
                outcome.synced, outcome.missing
            )),
            Err(error) => {
                warn!(class = %class_name, sheet = %sheet_name, %error, "sheet sync failed, skipping");
            }
        }
    }

    entries
}

/// Appends a timestamped summary block to a fresh per-run log file. The
/// summary is the authoritative record of the run, so failure here is fatal.
pub fn write_summary(config: &Config, entries: &[String]) -> Result<PathBuf> {
    fs::create_dir_all(&config.log_file_dir)?;

    let log_path = config.log_file_dir.join(format!(
        "description_{}.log",
        Local::now().format("%d-%m-%Y_%H.%M.%S")
    ));

    let mut log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)?;
    writeln!(
        log_file,
        "\n{} Sync Summary",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    for entry in entries {
        writeln!(log_file, "{entry}")?;
    }
    writeln!(log_file, "------")?;

    info!(path = %log_path.display(), "summary persisted");
    Ok(log_path)
}

/// Each subdirectory of the metadata root names one class. Sorted for a
/// deterministic processing order.
fn discover_classes(metadata_dir: &Path) -> Result<BTreeSet<String>> {
    let mut classes = BTreeSet::new();
    for entry in fs::read_dir(metadata_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            classes.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(classes)
}

fn list_filenames(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut filenames = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        filenames.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(filenames)
}
