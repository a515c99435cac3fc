//! Core library for the imgsync command line application.
//!
//! The library synchronizes image files referenced in spreadsheet metadata
//! into a class/sheet-organized target tree. The modules keep
//! responsibilities narrow and composable: settings live in [`config`],
//! metadata file selection in [`version`], per-row path decisions in
//! [`paths`], the copy-if-absent engine in [`sync`], the workbook adapter
//! under [`io`], and the per-run orchestration in [`run`].

pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod run;
pub mod sync;
pub mod version;

pub use error::{Result, SyncError};
