//! Configuration module
//!
//! Handles loading and managing harness configuration.

mod file;

use serde::{Deserialize, Serialize};

pub use file::ConfigFile;

/// Default run settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunDefaults {
    /// Directory containing the suite scripts
    pub suites_dir: String,

    /// Default output format
    pub format: String,

    /// Whether to colorize terminal output
    pub color: bool,

    /// Optional per-suite timeout in seconds. None preserves the
    /// default behavior of waiting indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            suites_dir: "tests".to_string(),
            format: "table".to_string(),
            color: true,
            timeout_secs: None,
        }
    }
}
