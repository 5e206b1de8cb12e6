//! dupfind - duplicate file finder
//!
//! Walks a directory tree, hashes every regular file with BLAKE3 and reports
//! each group of files that share the same content.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::CommandFactory;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextOutput};
use crate::progress::Progress;
use crate::scanner::WalkerConfig;

/// Run one scan as described by `cli`, writing the report to stdout.
///
/// # Errors
///
/// Returns an error when the root is missing or not a directory, when the
/// Ctrl+C handler cannot be installed, when the scan is interrupted or when
/// the report cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref());
    config.merge_cli(&cli);
    logging::init_logging(cli.verbose, quiet_logging(&cli, &config));
    log::debug!("Effective configuration: {:?}", config);

    let Some(directory) = cli.directory.clone() else {
        log::error!("directory argument is required");
        if let Err(e) = Cli::command().print_help() {
            log::debug!("Failed to print help: {e}");
        }
        return Ok(ExitCode::GeneralError);
    };

    let shutdown = signal::install_handler().context("Failed to set up Ctrl+C handling")?;

    let mut finder_config = FinderConfig::default()
        .with_io_threads(config.io_threads)
        .with_walker_config(WalkerConfig::new(config.follow_symlinks))
        .with_shutdown_flag(shutdown.get_flag());
    if !cli.quiet && config.output == OutputFormat::Text {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let result = match DuplicateFinder::new(finder_config).find_duplicates(&directory) {
        Ok(result) => result,
        Err(FinderError::Interrupted) => {
            log::warn!("Scan interrupted, no report written");
            return Ok(ExitCode::Interrupted);
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match config.output {
        OutputFormat::Text => TextOutput::new(&result)
            .write_to(&mut handle)
            .context("Failed to write report")?,
        OutputFormat::Json => JsonOutput::new(&result)
            .write_to(&mut handle, true)
            .context("Failed to write JSON report")?,
    }
    handle.flush().context("Failed to flush stdout")?;

    if result.summary.all_reads_failed() {
        log::warn!(
            "none of the {} files could be hashed",
            result.summary.total_files
        );
    } else if result.summary.read_failures > 0 {
        log::warn!(
            "{} of {} files could not be hashed",
            result.summary.read_failures,
            result.summary.total_files
        );
    }
    if result.summary.traversal_failures > 0 {
        log::warn!(
            "{} directories could not be traversed",
            result.summary.traversal_failures
        );
    }

    Ok(ExitCode::Success)
}

/// Logs are limited to errors with `-q`, or whenever stdout carries JSON.
fn quiet_logging(cli: &Cli, config: &Config) -> bool {
    cli.quiet || config.output == OutputFormat::Json
}
