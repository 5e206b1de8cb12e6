//! Command-line interface definitions for dupfind.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory and print duplicate groups
//! dupfind -d ~/Downloads
//!
//! # JSON output for scripting
//! dupfind -d ~/Downloads --output json
//!
//! # Hash sequentially, with debug logging
//! dupfind -v -d ~/Downloads --io-threads 1
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find files with identical content under a directory.
///
/// dupfind walks the directory recursively, hashes every regular file with
/// BLAKE3 and prints each group of files whose contents are the same.
#[derive(Debug, Parser)]
#[command(name = "dupfind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to search for duplicate files
    #[arg(short, long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Output format (text for people, json for scripting)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Number of I/O threads for hashing (default: 4, 1 = sequential)
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Follow symbolic links during the walk
    ///
    /// Warning: May cause infinite loops if symlinks form cycles.
    #[arg(long, conflicts_with = "no_follow_symlinks")]
    pub follow_symlinks: bool,

    /// Do not follow symbolic links, overriding the config file
    #[arg(long)]
    pub no_follow_symlinks: bool,

    /// Path to a TOML config file
    ///
    /// If not specified, `config.toml` in the platform config directory is used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Timestamped lines on stdout
    Text,
    /// JSON document on stdout
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
