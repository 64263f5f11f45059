//! CLI argument definitions for the bulletin normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bulletin",
    version,
    about = "River-levels bulletin normalizer",
    long_about = "Normalize machine-extracted river-level bulletin tables into the\n\
                  canonical 19-field schema and append them to a CSV sink.\n\
                  Documents are processed independently, in filename-ordinal order;\n\
                  a malformed document is reported and skipped, never aborts the batch."
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
    /// Normalize a folder of bulletin documents and append rows to the sink.
    Ingest(IngestArgs),

    /// List the canonical output schema.
    Schema,
}

#[derive(Parser)]
pub struct IngestArgs {
    /// Folder containing the extracted bulletin documents.
    #[arg(value_name = "BULLETIN_FOLDER")]
    pub bulletin_folder: PathBuf,

    /// Output directory for the sink CSV and batch report
    /// (default: <BULLETIN_FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Normalize and report without writing the sink or report files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Time slot that receives a lone water-level column when the session
    /// cannot be read from the filename. The morning default mirrors the
    /// upstream data convention; it is a documented guess, not a rule.
    #[arg(
        long = "unknown-session-slot",
        value_enum,
        default_value = "morning"
    )]
    pub unknown_session_slot: UnknownSlotArg,
}

/// Routing choice for Unknown-session documents.
#[derive(Clone, Copy, ValueEnum)]
pub enum UnknownSlotArg {
    Morning,
    Evening,
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
