//! Suite execution runner
//!
//! Runs one suite script to completion and reports its outcome. A
//! failing child is data, not an error: the runner never propagates a
//! suite failure upward, so a whole registry always runs to completion.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::models::{RunReport, SuiteOutcome, SuiteSpec};
use crate::registry::Registry;
use crate::utils::Timer;

/// Errors raised while starting or waiting on a suite child process.
/// These are mapped into Fail outcomes, never surfaced to the caller.
#[derive(Error, Debug)]
enum ExecError {
    #[error("failed to spawn: {0}")]
    Spawn(std::io::Error),

    #[error("failed to wait on child: {0}")]
    Wait(std::io::Error),

    #[error("timed out after {0}s")]
    Timeout(u64),
}

/// Sequential suite runner
///
/// Executes one suite at a time, blocking on each child until it exits.
/// By default no timeout is enforced; a hung suite hangs the run.
pub struct SuiteRunner {
    timeout: Option<Duration>,
}

impl SuiteRunner {
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Enforce a per-suite timeout. Off by default.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Run a single suite and record its outcome.
    ///
    /// An absent script is a legitimate state (a suite not yet written)
    /// and yields a skip with zero duration, without attempting execution.
    pub async fn run_suite(&self, spec: &SuiteSpec) -> SuiteOutcome {
        if !spec.exists() {
            info!("Skipping {} - script not found", spec);
            return SuiteOutcome::skip(&spec.label, "script not found");
        }

        ensure_executable(&spec.path);

        print_header(spec);

        let timer = Timer::start(&spec.label);
        let result = self.execute(spec).await;
        let duration_secs = timer.elapsed_secs();

        let outcome = match result {
            Ok(code) if code == 0 => SuiteOutcome::pass(&spec.label, duration_secs),
            Ok(code) => SuiteOutcome::fail(&spec.label, duration_secs, format!("exit code {code}")),
            Err(e) => SuiteOutcome::fail(&spec.label, duration_secs, e.to_string()),
        };

        print_footer(&outcome);
        outcome
    }

    /// Spawn the suite script and wait for it, passing stdout/stderr
    /// through so live suite output reaches the operator.
    async fn execute(&self, spec: &SuiteSpec) -> Result<i32, ExecError> {
        let mut child = Command::new(&spec.path)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(ExecError::Spawn)?;

        let status = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status.map_err(ExecError::Wait)?,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(ExecError::Timeout(limit.as_secs()));
                }
            },
            None => child.wait().await.map_err(ExecError::Wait)?,
        };

        // A signal-terminated child has no exit code; treat it as failure.
        Ok(status.code().unwrap_or(-1))
    }

    /// Run every suite in the registry sequentially, in registry order.
    pub async fn run_all(&self, registry: &Registry) -> RunReport {
        info!("Starting run of {} suite(s)", registry.len());

        let mut outcomes = Vec::with_capacity(registry.len());
        for spec in registry.iter() {
            let outcome = self.run_suite(spec).await;
            outcomes.push(outcome);
        }

        let report = RunReport::new(outcomes);
        info!(
            "Run completed in {:.2}s - Pass: {}/{} | Fail: {} | Skip: {}",
            report.duration_secs, report.passed, report.total, report.failed, report.skipped
        );
        report
    }
}

impl Default for SuiteRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Grant execute permission if the script lacks it. A common oversight
/// after checkout; healed here rather than reported as an error.
#[cfg(unix)]
fn ensure_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let Ok(metadata) = std::fs::metadata(path) else {
        return;
    };

    let mut permissions = metadata.permissions();
    if permissions.mode() & 0o111 == 0 {
        warn!("{} is not executable, granting execute permission", path.display());
        permissions.set_mode(permissions.mode() | 0o755);
        if let Err(e) = std::fs::set_permissions(path, permissions) {
            warn!("Could not set permissions on {}: {}", path.display(), e);
        }
    } else {
        debug!("{} is executable", path.display());
    }
}

#[cfg(not(unix))]
fn ensure_executable(_path: &Path) {}

fn print_header(spec: &SuiteSpec) {
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("▶ Running suite: {}", spec.label);
    println!("  script: {}", spec.path.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

fn print_footer(outcome: &SuiteOutcome) {
    println!("──────────────────────────────────────────────────────────────");
    println!("{outcome}");
}
