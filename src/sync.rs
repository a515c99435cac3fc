use std::fs;

use calamine::{DataType, Range};
use tracing::{debug, info, warn};

use crate::config::HASH_COLUMN;
use crate::error::{Result, SyncError};
use crate::io::excel_read::{cell_to_string, find_column};
use crate::paths::PathResolver;

/// Per-sheet tallies returned by [`sync_sheet`]. Rows whose target already
/// exists count in neither bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetOutcome {
    pub synced: u64,
    pub missing: u64,
}

/// Synchronises every row of one sheet into the target tree.
///
/// Copies are existence-checked: a target that is already present is left
/// untouched, which makes repeated runs idempotent. A row lacking the hash
/// or label cell is logged and skipped without affecting the rest of the
/// sheet. An absent source file is tallied as missing, not treated as an
/// error. The engine holds no state across invocations.
pub fn sync_sheet(
    class_name: &str,
    sheet_name: &str,
    range: &Range<DataType>,
    label_column: &str,
    resolver: &PathResolver<'_>,
) -> Result<SheetOutcome> {
    let mut outcome = SheetOutcome::default();

    let Some(header_row) = range.rows().next() else {
        return Ok(outcome);
    };
    let hash_idx = find_column(header_row, HASH_COLUMN);
    let label_idx = find_column(header_row, label_column);

    for row in range.rows().skip(1) {
        let (hash_value, label) =
            match extract_row(row, hash_idx, label_idx, sheet_name, label_column) {
                Ok(values) => values,
                Err(error) => {
                    warn!(class = %class_name, %error, "skipping row");
                    continue;
                }
            };

        let source_path = resolver.source_path(class_name, &label, &hash_value);
        let target_path = resolver.target_path(class_name, sheet_name, &label, &hash_value);

        if target_path.exists() {
            debug!(label = %label, hash = %hash_value, "already synced");
            continue;
        }

        if source_path.exists() {
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&source_path, &target_path)?;
            outcome.synced += 1;
            info!(label = %label, hash = %hash_value, "synced");
        } else {
            outcome.missing += 1;
            warn!(label = %label, hash = %hash_value, source = %source_path.display(), "missing source");
        }
    }

    Ok(outcome)
}

/// Pulls the hash and label cells out of one row. A missing column is a
/// typed error so the caller can log it and move on to the next row.
fn extract_row(
    row: &[DataType],
    hash_idx: Option<usize>,
    label_idx: Option<usize>,
    sheet_name: &str,
    label_column: &str,
) -> Result<(String, String)> {
    let hash_value = row_value(row, hash_idx).ok_or_else(|| SyncError::MissingColumn {
        sheet: sheet_name.to_string(),
        column: HASH_COLUMN.to_string(),
    })?;
    let label = row_value(row, label_idx).ok_or_else(|| SyncError::MissingColumn {
        sheet: sheet_name.to_string(),
        column: label_column.to_string(),
    })?;
    Ok((hash_value, label))
}

/// Extracts a trimmed cell value; absent columns and blank cells both read
/// as missing.
fn row_value(row: &[DataType], column_idx: Option<usize>) -> Option<String> {
    let value = cell_to_string(row.get(column_idx?));
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
