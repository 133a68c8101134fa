//! Report formatters
//!
//! Renders a finished run report as a fixed-width table, JSON, CSV, or
//! a one-line summary. Terminal colors live behind an injectable style
//! struct so the renderer can be tested without ANSI side effects.

use std::io::Write;

use crate::models::{RunReport, SuiteOutcome, SuiteStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Rendering configuration for the report formatter
#[derive(Clone, Copy, Debug)]
pub struct ReportStyle {
    pub colorize: bool,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self { colorize: true }
    }
}

impl ReportStyle {
    pub fn plain() -> Self {
        Self { colorize: false }
    }

    fn status(&self, status: SuiteStatus) -> String {
        let text = format!("{} {}", status.symbol(), status);
        if !self.colorize {
            return text;
        }
        match status {
            SuiteStatus::Pass => format!("\x1b[32m{text}\x1b[0m"),
            SuiteStatus::Fail => format!("\x1b[31m{text}\x1b[0m"),
            SuiteStatus::Skip => format!("\x1b[33m{text}\x1b[0m"),
        }
    }

    fn banner(&self, report: &RunReport) -> String {
        if report.succeeded() {
            let text = "ALL SUITES PASSED";
            if self.colorize {
                format!("\x1b[32m{text}\x1b[0m")
            } else {
                text.to_string()
            }
        } else {
            let text = format!("{} SUITE(S) FAILED", report.failed);
            if self.colorize {
                format!("\x1b[31m{text}\x1b[0m")
            } else {
                text
            }
        }
    }
}

/// Run report formatter
pub struct ReportFormatter {
    format: OutputFormat,
    style: ReportStyle,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            style: ReportStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.style = style;
        self
    }

    pub fn no_color(mut self) -> Self {
        self.style.colorize = false;
        self
    }

    /// Format the full run report
    pub fn format_report(&self, report: &RunReport) -> String {
        match self.format {
            OutputFormat::Table => self.format_table(report),
            OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Csv => self.format_csv(report),
            OutputFormat::Summary => self.format_brief(report),
        }
    }

    fn format_table(&self, report: &RunReport) -> String {
        let label_width = report
            .outcomes
            .iter()
            .map(|o| o.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(20);

        let mut output = String::new();
        let rule = "─".repeat(label_width + 28);

        output.push('\n');
        output.push_str(&rule);
        output.push('\n');
        output.push_str(&format!(
            "{:<label_width$}  {:<8}  {:>10}\n",
            "Suite", "Result", "Duration"
        ));
        output.push_str(&rule);
        output.push('\n');

        for outcome in &report.outcomes {
            output.push_str(&format!(
                "{:<label_width$}  {:<8}  {:>9.2}s\n",
                outcome.label,
                self.style.status(outcome.status),
                outcome.duration_secs
            ));
        }

        output.push_str(&rule);
        output.push('\n');
        output.push_str(&format!(
            "Total: {} | Passed: {} | Failed: {} | Skipped: {}\n",
            report.total, report.passed, report.failed, report.skipped
        ));
        output.push_str(&format!("Total time: {:.2}s\n", report.duration_secs));
        output.push_str(&rule);
        output.push('\n');
        output.push_str(&self.style.banner(report));
        output.push('\n');

        output
    }

    fn format_csv(&self, report: &RunReport) -> String {
        let mut output = String::new();
        output.push_str("suite,status,duration_secs,message\n");
        for outcome in &report.outcomes {
            output.push_str(&self.format_outcome_csv(outcome));
            output.push('\n');
        }
        output
    }

    fn format_outcome_csv(&self, outcome: &SuiteOutcome) -> String {
        format!(
            "\"{}\",{},{:.3},\"{}\"",
            outcome.label.replace('"', "\"\""),
            outcome.status,
            outcome.duration_secs,
            outcome.message.as_deref().unwrap_or("").replace('"', "\"\"")
        )
    }

    fn format_brief(&self, report: &RunReport) -> String {
        format!(
            "{}/{} passed, {} failed, {} skipped in {:.2}s",
            report.passed, report.total, report.failed, report.skipped, report.duration_secs
        )
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Write a report to a file, always without terminal colors.
pub fn write_report_to_file(
    path: &str,
    report: &RunReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let formatter = ReportFormatter::new(format).no_color();
    let content = formatter.format_report(report);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
