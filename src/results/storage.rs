//! Run report storage and retrieval
//!
//! Persists finished run reports as JSON files, one per run.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::models::RunReport;

/// Stored run containing the report plus run metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredRun {
    /// Unique run ID, derived from the start timestamp
    pub id: String,

    /// Directory the suites were resolved against
    pub suites_dir: String,

    /// Timestamp when the run started
    pub started_at: DateTime<Utc>,

    /// Timestamp when the run completed
    pub completed_at: DateTime<Utc>,

    /// The run report
    pub report: RunReport,
}

impl StoredRun {
    pub fn new(
        suites_dir: impl Into<String>,
        started_at: DateTime<Utc>,
        report: RunReport,
    ) -> Self {
        Self {
            id: started_at.format("%Y%m%d-%H%M%S").to_string(),
            suites_dir: suites_dir.into(),
            started_at,
            completed_at: Utc::now(),
            report,
        }
    }
}

/// Run storage manager
pub struct RunStorage {
    /// Base directory for stored runs
    base_dir: PathBuf,
}

impl RunStorage {
    /// Create a new run storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create with default directory
    pub fn default_dir() -> Self {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("doctool-harness")
            .join("results");
        Self::new(base_dir)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn run_path(&self, run_id: &str) -> PathBuf {
        self.base_dir.join(format!("{run_id}.json"))
    }

    /// Save a finished run
    pub fn save(&self, run: &StoredRun) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("Failed to create {}", self.base_dir.display()))?;

        let path = self.run_path(&run.id);
        let file = File::create(&path).context("Failed to create results file")?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, run).context("Failed to write results")?;

        info!("Saved run results to {}", path.display());
        Ok(path)
    }

    /// Load a stored run by ID
    pub fn load(&self, run_id: &str) -> Result<StoredRun> {
        let path = self.run_path(run_id);
        let file = File::open(&path)
            .with_context(|| format!("Failed to open results file: {}", path.display()))?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader).context("Failed to parse results file")
    }

    /// List stored runs, newest first
    pub fn list(&self) -> Result<Vec<StoredRun>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                match File::open(&path).map(BufReader::new) {
                    Ok(reader) => match serde_json::from_reader::<_, StoredRun>(reader) {
                        Ok(run) => runs.push(run),
                        Err(e) => debug!("Skipping unreadable results file {}: {}", path.display(), e),
                    },
                    Err(e) => debug!("Skipping {}: {}", path.display(), e),
                }
            }
        }

        runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(runs)
    }

    /// Load the most recent stored run, if any
    pub fn latest(&self) -> Result<Option<StoredRun>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Delete all but the newest `keep` runs
    pub fn prune(&self, keep: usize) -> Result<usize> {
        let runs = self.list()?;
        let mut removed = 0;

        for run in runs.iter().skip(keep) {
            let path = self.run_path(&run.id);
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed += 1;
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuiteOutcome;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample_run(started_at: DateTime<Utc>) -> StoredRun {
        let report = RunReport::new(vec![
            SuiteOutcome::pass("PDF tool wrappers", 1.0),
            SuiteOutcome::fail("Analysis tools", 0.5, "exit code 1"),
        ]);
        StoredRun::new("tests", started_at, report)
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = RunStorage::new(dir.path());

        let run = sample_run(Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap());
        storage.save(&run).unwrap();

        let loaded = storage.load(&run.id).unwrap();
        assert_eq!(loaded.id, "20260801-120000");
        assert_eq!(loaded.report.total, 2);
        assert_eq!(loaded.report.failed, 1);
    }

    #[test]
    fn test_list_newest_first() {
        let dir = TempDir::new().unwrap();
        let storage = RunStorage::new(dir.path());

        let older = sample_run(Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap());
        let newer = sample_run(Utc.with_ymd_and_hms(2026, 8, 2, 10, 0, 0).unwrap());
        storage.save(&older).unwrap();
        storage.save(&newer).unwrap();

        let runs = storage.list().unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id, newer.id);

        let latest = storage.latest().unwrap().unwrap();
        assert_eq!(latest.id, newer.id);
    }

    #[test]
    fn test_list_empty_when_dir_missing() {
        let dir = TempDir::new().unwrap();
        let storage = RunStorage::new(dir.path().join("nope"));
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = TempDir::new().unwrap();
        let storage = RunStorage::new(dir.path());

        for day in 1..=4 {
            let run = sample_run(Utc.with_ymd_and_hms(2026, 8, day, 9, 0, 0).unwrap());
            storage.save(&run).unwrap();
        }

        let removed = storage.prune(2).unwrap();
        assert_eq!(removed, 2);

        let runs = storage.list().unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id, "20260804-090000");
    }
}
