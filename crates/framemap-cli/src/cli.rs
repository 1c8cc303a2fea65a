//! CLI argument definitions for framemap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "framemap",
    version,
    about = "Apply declarative column-mapping rules to CSV data",
    long_about = "Apply declarative column-mapping rules to CSV data.\n\n\
                  Each row of the input is run through an ordered set of rules\n\
                  (conditions, modifications, constants, appends and side effects)\n\
                  to produce a new table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
    /// Run a mapping set against a CSV file.
    Run(RunArgs),

    /// List the built-in mapping sets.
    Mappings,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Name of the mapping set to apply (see `framemap mappings`).
    #[arg(long = "mapping", short = 'm', value_name = "NAME")]
    pub mapping: String,

    /// Source CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the mapped table to this CSV file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Field delimiter for both input and output CSV.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ',')]
    pub delimiter: char,

    /// Write run counters as JSON to this file.
    #[arg(long = "stats-json", value_name = "PATH")]
    pub stats_json: Option<PathBuf>,

    /// Number of output rows to print (0 disables the preview).
    #[arg(long = "preview", value_name = "N", default_value_t = 10)]
    pub preview: usize,
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
