//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Test-suite orchestrator for document-processing tool wrappers
#[derive(Parser, Debug)]
#[command(name = "doctool-harness")]
#[command(version = "0.1.0")]
#[command(about = "Discover, run, and report on script-based test suites")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the suite registry
    Run(RunArgs),

    /// List registered suites
    List(ListArgs),

    /// View stored run results
    Results(ResultsArgs),

    /// Manage harness configuration
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Directory containing the suite scripts
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Run only matching suites (label substring or 1-based number,
    /// repeatable). Registry order is preserved.
    #[arg(short, long)]
    pub suite: Vec<String>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Per-suite timeout in seconds (no timeout by default)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Write the report to a file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Persist the run to results storage
    #[arg(long)]
    pub save: bool,

    /// Configuration file to use
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show script paths and whether they exist
    #[arg(short, long)]
    pub detailed: bool,

    /// Directory containing the suite scripts
    #[arg(long)]
    pub dir: Option<String>,

    /// Configuration file to use
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Arguments for results command
#[derive(Parser, Debug)]
pub struct ResultsArgs {
    /// Show only the latest run
    #[arg(short, long)]
    pub latest: bool,

    /// Maximum number of runs to list
    #[arg(long, default_value = "10")]
    pub limit: usize,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Delete all but the newest N runs
    #[arg(long)]
    pub prune: Option<usize>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "./doctool-harness.yaml")]
        output: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show {
        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file (defaults to the discovered one)
        file: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["doctool-harness", "list", "--detailed"]);
        match args.command {
            Command::List(list_args) => {
                assert!(list_args.detailed);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_run_args() {
        let args = Args::parse_from([
            "doctool-harness",
            "run",
            "--dir",
            "suites",
            "--suite",
            "conversion",
            "--suite",
            "3",
            "--no-color",
        ]);
        match args.command {
            Command::Run(run_args) => {
                assert_eq!(run_args.dir.as_deref(), Some("suites"));
                assert_eq!(run_args.suite, vec!["conversion", "3"]);
                assert!(run_args.no_color);
                assert!(run_args.timeout.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_config_init_args() {
        let args = Args::parse_from(["doctool-harness", "config", "init", "--force"]);
        match args.command {
            Command::Config(config_args) => match config_args.action {
                ConfigAction::Init { output, force } => {
                    assert_eq!(output, "./doctool-harness.yaml");
                    assert!(force);
                }
                _ => panic!("Expected Init action"),
            },
            _ => panic!("Expected Config command"),
        }
    }
}
