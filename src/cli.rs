// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::types::WaitStrategy;

/// Command-line arguments for `jobdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobdag",
    version,
    disable_version_flag = true,
    about = "Run named jobs concurrently, respecting their dependencies.",
    long_about = None
)]
pub struct CliArgs {
    /// Print the version number and exit.
    #[arg(short = 'V', long, action = ArgAction::SetTrue)]
    pub version: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `--debug`, `JOBDAG_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Always `Some` unless `--version` was given.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the configured jobs, printing each name as it completes.
    Run {
        /// Path to the config file (TOML).
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Log job progress (scheduled / delaying / executing / completed)
        /// to stderr.
        #[arg(short, long)]
        debug: bool,

        /// Override `[config].wait_strategy` (notify or poll).
        #[arg(long, value_name = "STRATEGY")]
        wait_strategy: Option<WaitStrategy>,
    },

    /// Write a DOT graph of the configured jobs.
    Graph {
        /// Path to the config file (TOML).
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },
}

impl CliArgs {
    /// Level requested on the command line, if any.
    ///
    /// An explicit `--log-level` wins over `run --debug`.
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        match (&self.log_level, &self.command) {
            (Some(level), _) => Some(*level),
            (None, Some(Command::Run { debug: true, .. })) => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Bare semantic version, as printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse `itr` as a full command line.
///
/// A subcommand is required unless `--version` is given.
pub fn parse_from<I, T>(itr: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = CliArgs::try_parse_from(itr)?;
    if !args.version && args.command.is_none() {
        return Err(CliArgs::command().error(
            ErrorKind::MissingSubcommand,
            "a subcommand is required: `run <CONFIG>` or `graph <CONFIG>`",
        ));
    }
    Ok(args)
}

/// Parse the process arguments, exiting with a usage message on error.
pub fn parse() -> CliArgs {
    parse_from(std::env::args_os()).unwrap_or_else(|err| err.exit())
}
