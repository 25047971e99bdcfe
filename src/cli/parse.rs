//! CLI parse: clap types for triage. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Triage - priority admission queue with a durable audit trail
#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Priority admission queue with a durable audit trail")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Admit a patient to the queue
    Admit {
        /// Patient name (letters and spaces)
        #[arg(long)]
        name: String,
        /// Age in years (0-130)
        #[arg(long, allow_negative_numbers = true)]
        age: i64,
        /// Priority: 1-4 or LOW, MEDIUM, HIGH, EXTREME
        #[arg(long)]
        priority: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Call the next patient
    Next {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the current queue in call order
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Look up a patient by id, queued or not
    Show {
        /// Patient id (ULID)
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the number of waiting patients
    Size,
    /// Show the audit trail
    History {
        /// Restrict to one patient id
        id: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Menu-driven session (add, call next, show queue)
    Interactive,
}
