use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};

use crate::error::{Result, SyncError};

/// An open metadata workbook, one per class and run.
pub type MetadataWorkbook = Xlsx<BufReader<File>>;

/// Opens a metadata workbook, mapping open/parse failures to
/// [`SyncError::UnreadableMetadataFile`] so callers can skip the class.
pub fn open_metadata_workbook(path: &Path) -> Result<MetadataWorkbook> {
    open_workbook(path).map_err(|error: calamine::XlsxError| SyncError::UnreadableMetadataFile {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}

/// Lists the sheet names of an open workbook.
pub fn sheet_names(workbook: &MetadataWorkbook) -> Vec<String> {
    workbook.sheet_names().to_vec()
}

/// Reads one sheet as a cell range, mapping failures (including a sheet that
/// vanished between listing and reading) to [`SyncError::UnreadableSheet`].
pub fn read_sheet(workbook: &mut MetadataWorkbook, sheet_name: &str) -> Result<Range<DataType>> {
    let range_result =
        workbook
            .worksheet_range(sheet_name)
            .ok_or_else(|| SyncError::UnreadableSheet {
                sheet: sheet_name.to_string(),
                reason: "sheet not present in workbook".to_string(),
            })?;
    range_result.map_err(|error| SyncError::UnreadableSheet {
        sheet: sheet_name.to_string(),
        reason: error.to_string(),
    })
}

/// Renders a cell as a plain string; empty and absent cells become `""`.
pub fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Finds the index of a named column in the header row, comparing trimmed
/// values case-sensitively.
pub fn find_column(header_row: &[DataType], column_name: &str) -> Option<usize> {
    header_row
        .iter()
        .position(|cell| cell_to_string(Some(cell)).trim() == column_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_to_string_renders_common_kinds() {
        assert_eq!(
            cell_to_string(Some(&DataType::String("abc".to_string()))),
            "abc"
        );
        assert_eq!(cell_to_string(Some(&DataType::Int(7))), "7");
        assert_eq!(cell_to_string(Some(&DataType::Empty)), "");
        assert_eq!(cell_to_string(None), "");
    }

    #[test]
    fn find_column_trims_header_cells() {
        let header = vec![
            DataType::String(" hash value ".to_string()),
            DataType::String("Folder".to_string()),
        ];
        assert_eq!(find_column(&header, "hash value"), Some(0));
        assert_eq!(find_column(&header, "Folder"), Some(1));
        assert_eq!(find_column(&header, "Class"), None);
    }
}
