//! Configuration file management
//!
//! Handles finding, loading, and validating configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::RunDefaults;
use crate::models::SuiteSpec;
use crate::registry::Registry;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./doctool-harness.yaml",
    "./doctool-harness.yml",
    "./.doctool-harness.yaml",
    "~/.config/doctool-harness/config.yaml",
    "~/.doctool-harness.yaml",
];

/// Full configuration file structure
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Version of config file format
    #[serde(default = "default_version")]
    pub version: String,

    /// Default run settings
    #[serde(default)]
    pub defaults: RunDefaults,

    /// Explicit suite registry. When non-empty it replaces the
    /// built-in registry; order is execution order.
    #[serde(default)]
    pub suites: Vec<SuiteSpec>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            defaults: RunDefaults::default(),
            suites: Vec::new(),
        }
    }
}

impl ConfigFile {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        for location in CONFIG_LOCATIONS {
            let path = expand_path(location);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::find() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }

        if crate::output::OutputFormat::from_str(&self.defaults.format).is_none() {
            anyhow::bail!("Unknown output format: {}", self.defaults.format);
        }

        for suite in &self.suites {
            if suite.label.trim().is_empty() {
                anyhow::bail!("Suite with path {} has an empty label", suite.path.display());
            }
        }

        Ok(())
    }

    /// Build the effective registry: explicit suites if configured,
    /// otherwise the built-in list rooted at the suites directory.
    pub fn registry(&self, suites_dir: &Path) -> Registry {
        if self.suites.is_empty() {
            Registry::builtin(suites_dir)
        } else {
            Registry::from_specs(self.suites.iter().map(|s| s.rooted(suites_dir)).collect())
        }
    }

    /// Generate example configuration
    pub fn example() -> Self {
        Self {
            version: "1.0".to_string(),
            defaults: RunDefaults {
                suites_dir: "tests".to_string(),
                format: "table".to_string(),
                color: true,
                timeout_secs: None,
            },
            suites: vec![
                SuiteSpec::new("test_pdf_tools.sh", "PDF tool wrappers"),
                SuiteSpec::new("test_convert.sh", "Document conversion"),
            ],
        }
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
