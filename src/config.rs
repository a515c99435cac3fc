use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, SyncError};

/// Column holding the image identifier in every metadata sheet.
pub const HASH_COLUMN: &str = "hash value";

/// Label column used for classes without an explicit mapping.
pub const DEFAULT_LABEL_COLUMN: &str = "Folder";

/// Label value that routes a clinical-class row to the clinical source root.
pub const CLINIC_LABEL: &str = "clinic";

/// Image source directories, one per acquisition kind.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRoots {
    pub dermoscopic: PathBuf,
    pub clinical: PathBuf,
    pub base: PathBuf,
}

/// Process-wide settings, loaded once at startup and immutable for the run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source_roots: SourceRoots,
    pub target_roots: PathBuf,
    #[serde(default)]
    pub clinical_classes: BTreeSet<String>,
    #[serde(default)]
    pub label_columns: BTreeMap<String, String>,
    pub metadata_dir: PathBuf,
    pub log_file_dir: PathBuf,
}

impl Config {
    /// Loads the configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SyncError::MissingConfig(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Reports label-column mappings that reference none of the discovered
    /// classes. Unknown keys are harmless, so this warns rather than fails.
    pub fn validate_label_columns(&self, known_classes: &BTreeSet<String>) {
        for class_name in self.label_columns.keys() {
            if !known_classes.contains(class_name) {
                warn!(class = %class_name, "label_columns entry matches no class directory");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clinical_classes_and_mappings_are_optional() {
        let config: Config = serde_yaml::from_str(
            r#"
source_roots:
  dermoscopic: /d
  clinical: /c
  base: /b
target_roots: /t
metadata_dir: /m
log_file_dir: /l
"#,
        )
        .expect("minimal config parses");
        assert!(config.clinical_classes.is_empty());
        assert!(config.label_columns.is_empty());
    }
}
