//! Appraisal CLI - faculty performance appraisal workflow
//!
//! Usage: appraisal [--as-id ID --role admin|faculty] <COMMAND>
//!
//! Commands:
//!   cycle      Author and browse appraisal cycles
//!   appraisal  Self assessment, review and finalization
//!   rollup     Annual appraisals from completed months

mod commands;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use appraisal::config::{Config, OutputFormat, Verbosity};
use appraisal::infrastructure::SystemClock;
use appraisal::presentation::cli::{Cli, Commands};
use appraisal::presentation::create_workflow;

use commands::appraisals::cmd_appraisal;
use commands::cycle::cmd_cycle;
use commands::rollup::cmd_rollup;
use commands::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().ok();
    let (mut config, warnings) = Config::discover(cli.config.as_deref(), cwd.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.store.data_dir = Some(dir.clone());
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }

    init_tracing(cli.verbose, config.output.verbosity);
    if config.output.verbosity != Verbosity::Quiet {
        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }
    }

    let session = Session {
        workflow: create_workflow(&config, Arc::new(SystemClock))?,
        actor: cli.actor.identity(),
        format: config.output.format,
    };

    match cli.command {
        Commands::Cycle(command) => cmd_cycle(&session, command),
        Commands::Appraisal(command) => cmd_appraisal(&session, command),
        Commands::Rollup { year, employee } => cmd_rollup(&session, year, employee),
    }
}

/// `-v` flags win over the configured verbosity; APPRAISAL_LOG or RUST_LOG
/// replace both
fn init_tracing(verbose: u8, verbosity: Verbosity) {
    let default = match (verbose, verbosity) {
        (0, Verbosity::Quiet) => "error",
        (0, Verbosity::Normal) => "warn,audit=info",
        (0, Verbosity::Verbose) | (1, _) => "info",
        (0, Verbosity::Debug) | (2, _) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("APPRAISAL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
