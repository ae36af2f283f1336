//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;
use app_sync::output::OutputConfig;

/// App Sync - Clone or update front-end app dependencies from git
#[derive(Parser, Debug)]
#[command(name = "app-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone missing app dependencies and update existing ones
    Sync(commands::sync::SyncArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let quiet = matches!(&self.command, Commands::Sync(args) if args.quiet);
        init_logging(&self.log_level, quiet);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &output),
        }
    }
}

/// Install env_logger at `level`; `RUST_LOG` takes precedence when set.
///
/// `quiet` caps every filter at errors, including one from `RUST_LOG`.
fn init_logging(level: &str, quiet: bool) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init();

    if quiet {
        log::set_max_level(LevelFilter::Error);
    }
}
