use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Error type covering the different failure cases that can occur while
/// selecting metadata, reading spreadsheets, and copying images.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Wrapper for IO failures such as copying files or writing the log.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the YAML configuration cannot be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Raised when a metadata workbook cannot be opened or parsed at all.
    #[error("unreadable metadata file {path:?}: {reason}")]
    UnreadableMetadataFile { path: PathBuf, reason: String },

    /// Raised when one sheet of an otherwise-valid workbook fails to parse.
    #[error("unreadable sheet '{sheet}': {reason}")]
    UnreadableSheet { sheet: String, reason: String },

    /// Raised when a sheet lacks a column every row is expected to carry.
    #[error("sheet '{sheet}' is missing expected column '{column}'")]
    MissingColumn { sheet: String, column: String },

    /// Raised when a class directory contains no versioned metadata file.
    #[error("no metadata files found for class '{0}'")]
    NoMetadataFound(String),

    /// Raised when the user provides a configuration path that does not exist.
    #[error("configuration file not found: {0:?}")]
    MissingConfig(PathBuf),
}
