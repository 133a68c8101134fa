//! Suite registry
//!
//! Enumerates the suites to run, in a fixed, deterministic order. The
//! order determines execution and report order and is stable across runs.

use std::path::Path;

use crate::models::SuiteSpec;

/// Built-in suites, in execution order. Paths are relative to the
/// suites root directory.
const DEFAULT_SUITES: &[(&str, &str)] = &[
    ("test_pdf_tools.sh", "PDF tool wrappers"),
    ("test_convert.sh", "Document conversion"),
    ("test_template.sh", "Template compilation"),
    ("test_diagrams.sh", "Diagram rendering"),
    ("test_analysis.sh", "Analysis tools"),
];

/// Ordered collection of suite specs
///
/// No validation happens at registration time; a registered suite whose
/// script is absent is reported as a skip when executed.
#[derive(Clone, Debug)]
pub struct Registry {
    suites: Vec<SuiteSpec>,
}

impl Registry {
    /// Build the built-in registry rooted at a suites directory.
    pub fn builtin(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let suites = DEFAULT_SUITES
            .iter()
            .map(|(path, label)| SuiteSpec::new(root.join(path), *label))
            .collect();
        Self { suites }
    }

    /// Build a registry from explicit specs, preserving their order.
    pub fn from_specs(suites: Vec<SuiteSpec>) -> Self {
        Self { suites }
    }

    /// Keep only suites matching any selector, preserving registry order.
    ///
    /// A selector is either a 1-based suite number or a case-insensitive
    /// label substring.
    pub fn filter(&self, selectors: &[String]) -> Self {
        if selectors.is_empty() {
            return self.clone();
        }

        let suites = self
            .suites
            .iter()
            .enumerate()
            .filter(|(idx, spec)| {
                selectors.iter().any(|sel| {
                    if let Ok(n) = sel.parse::<usize>() {
                        n == idx + 1
                    } else {
                        spec.label.to_lowercase().contains(&sel.to_lowercase())
                    }
                })
            })
            .map(|(_, spec)| spec.clone())
            .collect();

        Self { suites }
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SuiteSpec> {
        self.suites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_is_stable() {
        let registry = Registry::builtin("tests");
        let labels: Vec<_> = registry.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "PDF tool wrappers",
                "Document conversion",
                "Template compilation",
                "Diagram rendering",
                "Analysis tools",
            ]
        );
    }

    #[test]
    fn test_builtin_roots_paths() {
        let registry = Registry::builtin("/opt/suites");
        let first = registry.iter().next().unwrap();
        assert_eq!(
            first.path,
            std::path::PathBuf::from("/opt/suites/test_pdf_tools.sh")
        );
    }

    #[test]
    fn test_filter_by_label_substring() {
        let registry = Registry::builtin("tests");
        let filtered = registry.filter(&["conversion".to_string()]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(
            filtered.iter().next().unwrap().label,
            "Document conversion"
        );
    }

    #[test]
    fn test_filter_by_number_preserves_order() {
        let registry = Registry::builtin("tests");
        let filtered = registry.filter(&["3".to_string(), "1".to_string()]);
        let labels: Vec<_> = filtered.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["PDF tool wrappers", "Template compilation"]);
    }

    #[test]
    fn test_empty_selectors_keep_everything() {
        let registry = Registry::builtin("tests");
        assert_eq!(registry.filter(&[]).len(), registry.len());
    }
}
