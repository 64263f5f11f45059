//! River-levels bulletin normalizer CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use bulletin_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, UnknownSlotArg};
use bulletin_cli::commands::{run_ingest, run_schema};
use bulletin_cli::logging::{LogConfig, LogFormat, init_logging};
use bulletin_cli::summary::print_summary;
use bulletin_cli::types::BatchConfig;
use bulletin_transform::{NormalizeOptions, RoutingOptions, TimeSlot};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Ingest(args) => {
            let config = BatchConfig {
                output_dir: args
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| args.bulletin_folder.join("output")),
                source_dir: args.bulletin_folder,
                dry_run: args.dry_run,
                normalize: NormalizeOptions {
                    routing: RoutingOptions {
                        unknown_slot: match args.unknown_session_slot {
                            UnknownSlotArg::Morning => TimeSlot::Morning0800,
                            UnknownSlotArg::Evening => TimeSlot::Evening1800,
                        },
                    },
                },
            };
            match run_ingest(&config) {
                Ok(report) => {
                    print_summary(&report);
                    if report.has_failures() { 1 } else { 0 }
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
        Command::Schema => {
            run_schema();
            0
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
