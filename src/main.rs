//! doctool-harness - Test-suite orchestrator for document-processing tool wrappers
//!
//! A CLI tool that discovers, executes, times, and reports on the
//! independent script-based test suites of a document toolchain (PDF
//! manipulation wrappers, conversion, template compilation, analysis).
//!
//! ## Features
//!
//! - Fixed, deterministic suite registry with config-file override
//! - Sequential execution with live suite output
//! - Missing suites reported as skips, never as failures
//! - Self-healing of missing execute permissions
//! - Multiple output formats (Table, JSON, CSV, Summary)
//! - Persistent run history
//!
//! ## Usage
//!
//! ```bash
//! # Run all registered suites
//! doctool-harness run
//!
//! # Run from a different suites directory, only the conversion suite
//! doctool-harness run --dir ./tests --suite conversion
//!
//! # List registered suites
//! doctool-harness list --detailed
//!
//! # Show stored results
//! doctool-harness results --latest
//! ```

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod config;
mod executor;
mod models;
mod output;
mod registry;
mod results;
mod utils;

use cli::Args;
use config::ConfigFile;
use executor::SuiteRunner;
use output::{write_report_to_file, OutputFormat, ReportFormatter, ReportStyle};
use results::{RunStorage, StoredRun};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        cli::Command::Run(run_args) => {
            run_suites(run_args).await?;
        }
        cli::Command::List(list_args) => {
            list_suites(list_args)?;
        }
        cli::Command::Results(results_args) => {
            show_results(results_args)?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args)?;
        }
    }

    Ok(())
}

fn load_config(path: &Option<String>) -> Result<ConfigFile> {
    match path {
        Some(path) => ConfigFile::load(path),
        None => ConfigFile::load_default(),
    }
}

async fn run_suites(args: cli::RunArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    let suites_dir = args
        .dir
        .unwrap_or_else(|| config.defaults.suites_dir.clone());
    let registry = config.registry(Path::new(&suites_dir)).filter(&args.suite);

    if registry.is_empty() {
        anyhow::bail!("No suites selected");
    }

    let format_name = args.format.unwrap_or_else(|| config.defaults.format.clone());
    let format = OutputFormat::from_str(&format_name)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {format_name}"))?;

    let style = ReportStyle {
        colorize: config.defaults.color && !args.no_color,
    };

    let mut runner = SuiteRunner::new();
    if let Some(secs) = args.timeout.or(config.defaults.timeout_secs) {
        runner = runner.with_timeout(secs);
    }

    info!("Running {} suite(s) from {}", registry.len(), suites_dir);

    let started_at = Utc::now();
    let report = runner.run_all(&registry).await;

    let formatter = ReportFormatter::new(format).with_style(style);
    println!("{}", formatter.format_report(&report));

    if let Some(output_path) = &args.output {
        write_report_to_file(output_path, &report, format)?;
        println!("Report written to: {output_path}");
    }

    if args.save {
        let run = StoredRun::new(&suites_dir, started_at, report.clone());
        // A run that cannot be persisted is still a finished run;
        // storage problems never change the exit code.
        if let Err(e) = RunStorage::default_dir().save(&run) {
            tracing::error!("Could not save run results: {e:#}");
        }
    }

    if !report.succeeded() {
        std::process::exit(report.exit_code());
    }

    Ok(())
}

fn list_suites(args: cli::ListArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let suites_dir = args
        .dir
        .unwrap_or_else(|| config.defaults.suites_dir.clone());
    let registry = config.registry(Path::new(&suites_dir));

    println!("\nRegistered suites ({} total)\n", registry.len());
    println!("──────────────────────────────────────────────────────────────");

    for (idx, spec) in registry.iter().enumerate() {
        if args.detailed {
            let presence = if spec.exists() { "present" } else { "absent" };
            println!(
                "  {:2}. {:24} {:8} {}",
                idx + 1,
                spec.label,
                presence,
                spec.path.display()
            );
        } else {
            println!("  {:2}. {}", idx + 1, spec.label);
        }
    }

    println!("──────────────────────────────────────────────────────────────\n");
    Ok(())
}

fn show_results(args: cli::ResultsArgs) -> Result<()> {
    let storage = RunStorage::default_dir();

    if let Some(keep) = args.prune {
        let removed = storage.prune(keep)?;
        println!("Removed {removed} stored run(s), kept the newest {keep}.");
        return Ok(());
    }

    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", args.format))?;
    let formatter = ReportFormatter::new(format);

    if args.latest {
        match storage.latest()? {
            Some(run) => {
                println!("Run {} ({})", run.id, run.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
                println!("{}", formatter.format_report(&run.report));
            }
            None => {
                println!("No stored results found.");
                println!("Run suites with: doctool-harness run --save");
            }
        }
        return Ok(());
    }

    let runs = storage.list()?;
    if runs.is_empty() {
        println!("No stored results found.");
        println!("Run suites with: doctool-harness run --save");
        return Ok(());
    }

    println!("\nStored runs (showing up to {}):\n", args.limit);
    for run in runs.iter().take(args.limit) {
        println!(
            "  {} | {:2} suites | {:2} failed | {:6.2}s | {}",
            run.id,
            run.report.total,
            run.report.failed,
            run.report.duration_secs,
            if run.report.succeeded() { "ok" } else { "FAILED" }
        );
    }
    println!("\nUse --latest to show the full report of the newest run.\n");

    Ok(())
}

fn manage_config(args: cli::ConfigArgs) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            let config = ConfigFile::example();
            config.save(path)?;
            println!("✓ Configuration file created: {output}");
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Show { format } => {
            let config = ConfigFile::load_default()?;
            let output = if format == "json" {
                serde_json::to_string_pretty(&config)?
            } else {
                serde_yaml::to_string(&config)?
            };
            println!("{output}");
        }

        cli::ConfigAction::Validate { file } => {
            let path = file.unwrap_or_else(|| {
                ConfigFile::find()
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_else(|| "./doctool-harness.yaml".to_string())
            });

            match ConfigFile::load(&path) {
                Ok(_) => {
                    println!("✓ Configuration file is valid: {path}");
                }
                Err(e) => {
                    println!("✗ Configuration file is invalid: {path}");
                    println!("  Error: {e}");
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
