//! CLI argument definitions for the dataset validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "prism",
    version,
    about = "Validate research dataset layouts against versioned metadata schemas",
    long_about = "Validate a research dataset directory tree.\n\n\
                  Checks filename grammar, modality placement, sidecar presence,\n\
                  JSON metadata against the selected schema bundle, and\n\
                  cross-subject structural consistency."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a dataset tree and print a summary.
    Validate(ValidateArgs),

    /// List the installed schema bundle versions.
    Versions,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the dataset root (the directory holding sub-* folders).
    #[arg(value_name = "DATASET_ROOT")]
    pub root: PathBuf,

    /// Schema bundle version to validate against (default: stable).
    #[arg(long = "schema-version", value_name = "VERSION")]
    pub schema_version: Option<String>,

    /// Write the full JSON report to a file.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
