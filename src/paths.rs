use std::path::{Path, PathBuf};

use crate::config::{CLINIC_LABEL, Config, DEFAULT_LABEL_COLUMN};

/// Decides where a row's image is read from and where it is written to.
///
/// Target placement is deterministic and independent of source resolution:
/// `<target_roots>/<class>/<sheet>/photos/<label>/<hash>`. Label and hash
/// values are used verbatim as path segments; unexpected characters in them
/// are a data-quality issue upstream, not something this resolver escapes.
pub struct PathResolver<'a> {
    config: &'a Config,
}

impl<'a> PathResolver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Returns the column that holds the label value for the given class,
    /// falling back to the fixed default for unmapped classes.
    pub fn label_column(&self, class_name: &str) -> &str {
        self.config
            .label_columns
            .get(class_name)
            .map(String::as_str)
            .unwrap_or(DEFAULT_LABEL_COLUMN)
    }

    /// Base directory assigned to a class before any per-label branching:
    /// clinical classes get the main base root, all others the dermoscopic
    /// root.
    pub fn class_source_root(&self, class_name: &str) -> &Path {
        if self.config.clinical_classes.contains(class_name) {
            &self.config.source_roots.base
        } else {
            &self.config.source_roots.dermoscopic
        }
    }

    /// Source directory for one row. Clinical classes branch on the label
    /// value: `clinic` rows come from the clinical root, every other label
    /// from the dermoscopic root. Other classes resolve to a constant root
    /// regardless of label.
    pub fn source_dir(&self, class_name: &str, label: &str) -> &Path {
        if self.config.clinical_classes.contains(class_name) {
            if label == CLINIC_LABEL {
                &self.config.source_roots.clinical
            } else {
                &self.config.source_roots.dermoscopic
            }
        } else {
            self.class_source_root(class_name)
        }
    }

    pub fn source_path(&self, class_name: &str, label: &str, hash_value: &str) -> PathBuf {
        self.source_dir(class_name, label).join(hash_value)
    }

    pub fn target_path(
        &self,
        class_name: &str,
        sheet_name: &str,
        label: &str,
        hash_value: &str,
    ) -> PathBuf {
        self.config
            .target_roots
            .join(class_name)
            .join(sheet_name)
            .join("photos")
            .join(label)
            .join(hash_value)
    }
}
