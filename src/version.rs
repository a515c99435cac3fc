const PREFIX: &str = "metadata_training_";
const HASH_MARKER: &str = "_with_hash_value_";
const EXTENSION: &str = ".xlsx";

/// Dot-separated numeric version ordered component-wise, so `2.10.0` beats
/// `2.9.0`. The filename convention only admits digits and dots, which also
/// allows forms semver cannot represent: short versions like `2.1` and
/// four-component versions like `1.2.3.4` are both valid candidates, with
/// missing trailing components ranking lower (`1.2.3` < `1.2.3.4`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionKey(Vec<u64>);

impl VersionKey {
    /// Parses a dot-separated numeric version string. Any non-numeric
    /// component makes the whole string unparsable.
    pub fn parse(version_str: &str) -> Option<Self> {
        let components = version_str
            .split('.')
            .map(str::parse)
            .collect::<Result<Vec<u64>, _>>()
            .ok()?;
        Some(Self(components))
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

/// A versioned metadata workbook discovered inside a class directory.
/// Recomputed on every run; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFile {
    pub class_name: String,
    pub version: VersionKey,
    pub filename: String,
}

/// Parses a candidate filename of the form
/// `metadata_training_<class>_<version>.xlsx` or
/// `metadata_training_<class>_with_hash_value_<version>.xlsx`.
///
/// Returns `None` when the name does not follow the convention or the
/// version string cannot be ordered; such files are simply not candidates.
pub fn parse_metadata_filename(filename: &str) -> Option<MetadataFile> {
    let stem = filename.strip_suffix(EXTENSION)?;
    let rest = stem.strip_prefix(PREFIX)?;

    let (class_name, version_str) = match rest.find(HASH_MARKER) {
        Some(idx) => (&rest[..idx], &rest[idx + HASH_MARKER.len()..]),
        None => rest.rsplit_once('_')?,
    };

    if class_name.is_empty() || version_str.is_empty() {
        return None;
    }

    let version = VersionKey::parse(version_str)?;
    Some(MetadataFile {
        class_name: class_name.to_string(),
        version,
        filename: filename.to_string(),
    })
}

/// Selects the latest metadata file among the given filenames.
///
/// Versions are compared component-wise. Equal versions are broken toward
/// the lexicographically greatest filename, which prefers the
/// `with_hash_value` variant over the plain one.
pub fn select_latest<I, S>(filenames: I) -> Option<MetadataFile>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    filenames
        .into_iter()
        .filter_map(|name| parse_metadata_filename(name.as_ref()))
        .max_by(|lhs, rhs| {
            lhs.version
                .cmp(&rhs.version)
                .then_with(|| lhs.filename.cmp(&rhs.filename))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_filename() {
        let meta = parse_metadata_filename("metadata_training_bm_2.1.0.xlsx")
            .expect("plain filename parses");
        assert_eq!(meta.class_name, "bm");
        assert_eq!(meta.version.components(), &[2, 1, 0]);
    }

    #[test]
    fn parses_with_hash_value_variant() {
        let meta = parse_metadata_filename("metadata_training_mnm_with_hash_value_1.4.2.xlsx")
            .expect("hash-value filename parses");
        assert_eq!(meta.class_name, "mnm");
        assert_eq!(meta.version.components(), &[1, 4, 2]);
    }

    #[test]
    fn accepts_short_version_strings() {
        let meta =
            parse_metadata_filename("metadata_training_cm_2.1.xlsx").expect("short version parses");
        assert_eq!(meta.version.components(), &[2, 1]);
        assert!(meta.version < VersionKey::parse("2.1.0").unwrap());
    }

    #[test]
    fn rejects_nonconforming_filenames() {
        assert!(parse_metadata_filename("notes.txt").is_none());
        assert!(parse_metadata_filename("metadata_training_bm.xlsx").is_none());
        assert!(parse_metadata_filename("metadata_training_bm_abc.xlsx").is_none());
        assert!(parse_metadata_filename("metadata_training_bm_1.2.x.xlsx").is_none());
    }

    #[test]
    fn numeric_components_beat_lexicographic_order() {
        let latest = select_latest([
            "metadata_training_bm_2.9.5.xlsx",
            "metadata_training_bm_2.10.0.xlsx",
        ])
        .expect("candidates exist");
        assert_eq!(latest.version.components(), &[2, 10, 0]);
    }

    #[test]
    fn selects_highest_version_among_candidates() {
        let latest = select_latest([
            "metadata_training_bm_1.0.0.xlsx",
            "metadata_training_bm_2.1.0.xlsx",
            "readme.md",
        ])
        .expect("candidates exist");
        assert_eq!(latest.filename, "metadata_training_bm_2.1.0.xlsx");
    }

    #[test]
    fn four_component_version_outranks_its_prefix() {
        let latest = select_latest([
            "metadata_training_bm_1.2.3.4.xlsx",
            "metadata_training_bm_1.2.3.xlsx",
        ])
        .expect("candidates exist");
        assert_eq!(latest.filename, "metadata_training_bm_1.2.3.4.xlsx");
    }

    #[test]
    fn equal_versions_prefer_hash_value_variant() {
        let latest = select_latest([
            "metadata_training_bm_2.1.0.xlsx",
            "metadata_training_bm_with_hash_value_2.1.0.xlsx",
        ])
        .expect("candidates exist");
        assert_eq!(
            latest.filename,
            "metadata_training_bm_with_hash_value_2.1.0.xlsx"
        );
    }

    #[test]
    fn empty_listing_yields_none() {
        assert!(select_latest(Vec::<String>::new()).is_none());
    }
}
