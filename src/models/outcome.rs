//! Suite outcome models
//!
//! Defines suite statuses, per-suite outcomes, and the final run report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suite execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteStatus {
    Pass,
    Fail,
    Skip,
}

impl SuiteStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            SuiteStatus::Pass => "✓",
            SuiteStatus::Fail => "✗",
            SuiteStatus::Skip => "○",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SuiteStatus::Pass)
    }
}

impl fmt::Display for SuiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteStatus::Pass => write!(f, "PASS"),
            SuiteStatus::Fail => write!(f, "FAIL"),
            SuiteStatus::Skip => write!(f, "SKIP"),
        }
    }
}

/// Result of attempting to run one suite
///
/// Created exactly once per suite, after execution or skip detection,
/// and never mutated afterward.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteOutcome {
    pub label: String,
    pub status: SuiteStatus,
    pub duration_secs: f64,
    pub message: Option<String>,
}

impl SuiteOutcome {
    pub fn pass(label: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            label: label.into(),
            status: SuiteStatus::Pass,
            duration_secs,
            message: None,
        }
    }

    pub fn fail(label: impl Into<String>, duration_secs: f64, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: SuiteStatus::Fail,
            duration_secs,
            message: Some(message.into()),
        }
    }

    /// A skipped suite always carries zero duration.
    pub fn skip(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: SuiteStatus::Skip,
            duration_secs: 0.0,
            message: Some(reason.into()),
        }
    }
}

impl fmt::Display for SuiteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{:.2}s]",
            self.status.symbol(),
            self.label,
            self.duration_secs
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Final report of one orchestrated run
///
/// Outcomes are kept in registry order. Counts are derived once at
/// construction; the report is read-only afterward.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_secs: f64,
    pub outcomes: Vec<SuiteOutcome>,
}

impl RunReport {
    pub fn new(outcomes: Vec<SuiteOutcome>) -> Self {
        let total = outcomes.len();
        let passed = outcomes
            .iter()
            .filter(|o| o.status == SuiteStatus::Pass)
            .count();
        let failed = outcomes
            .iter()
            .filter(|o| o.status == SuiteStatus::Fail)
            .count();
        let skipped = outcomes
            .iter()
            .filter(|o| o.status == SuiteStatus::Skip)
            .count();
        let duration_secs = outcomes.iter().map(|o| o.duration_secs).sum();

        Self {
            total,
            passed,
            failed,
            skipped,
            duration_secs,
            outcomes,
        }
    }

    /// A run succeeds iff no suite failed. Skipped suites never count
    /// against the run.
    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code for this run: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "  {outcome}")?;
        }
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Skip: {}",
            self.total, self.passed, self.failed, self.skipped
        )?;
        writeln!(f, "Duration: {:.2}s", self.duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_creation() {
        let outcome = SuiteOutcome::pass("PDF tool wrappers", 1.25);
        assert!(outcome.status.is_success());
        assert_eq!(outcome.duration_secs, 1.25);
    }

    #[test]
    fn test_skip_has_zero_duration() {
        let outcome = SuiteOutcome::skip("Diagram rendering", "script not found");
        assert_eq!(outcome.status, SuiteStatus::Skip);
        assert_eq!(outcome.duration_secs, 0.0);
    }

    #[test]
    fn test_report_counts() {
        let report = RunReport::new(vec![
            SuiteOutcome::pass("a", 1.0),
            SuiteOutcome::fail("b", 0.5, "exit code 3"),
            SuiteOutcome::skip("c", "script not found"),
        ]);

        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.total, report.passed + report.failed + report.skipped);
        assert_eq!(report.total, report.outcomes.len());
    }

    #[test]
    fn test_skips_do_not_fail_run() {
        let report = RunReport::new(vec![
            SuiteOutcome::pass("a", 0.1),
            SuiteOutcome::skip("b", "script not found"),
            SuiteOutcome::skip("c", "script not found"),
        ]);

        assert!(report.succeeded());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_one_failure_fails_run() {
        let report = RunReport::new(vec![
            SuiteOutcome::pass("a", 0.1),
            SuiteOutcome::fail("b", 0.2, "exit code 127"),
        ]);

        assert!(!report.succeeded());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_skip_duration_does_not_distort_total() {
        let report = RunReport::new(vec![
            SuiteOutcome::pass("a", 1.5),
            SuiteOutcome::skip("b", "script not found"),
            SuiteOutcome::pass("c", 0.5),
        ]);

        assert!((report.duration_secs - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_report_preserves_order() {
        let report = RunReport::new(vec![
            SuiteOutcome::pass("first", 0.1),
            SuiteOutcome::pass("second", 0.1),
            SuiteOutcome::pass("third", 0.1),
        ]);

        let labels: Vec<_> = report.outcomes.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }
}
