//! Suite specification
//!
//! Identifies one independently runnable test suite script.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One registered test suite: a script path plus a human-readable label.
///
/// Immutable once registered. Existence of the script is checked at
/// execution time, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSpec {
    /// Path to the suite script
    pub path: PathBuf,

    /// Human-readable suite label
    pub label: String,
}

impl SuiteSpec {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }

    /// Same spec with the script path resolved under a root directory.
    pub fn rooted(&self, root: impl AsRef<Path>) -> Self {
        Self {
            path: root.as_ref().join(&self.path),
            label: self.label.clone(),
        }
    }

    /// Whether the suite script is present on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl fmt::Display for SuiteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_joins_path() {
        let spec = SuiteSpec::new("test_convert.sh", "Document conversion");
        let rooted = spec.rooted("/opt/suites");
        assert_eq!(rooted.path, PathBuf::from("/opt/suites/test_convert.sh"));
        assert_eq!(rooted.label, "Document conversion");
    }

    #[test]
    fn test_missing_script_does_not_exist() {
        let spec = SuiteSpec::new("/nonexistent/suite.sh", "ghost");
        assert!(!spec.exists());
    }
}
