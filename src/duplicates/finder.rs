//! Duplicate finder: runs the walk → group → report pipeline for one root.
//!
//! # Overview
//!
//! 1. **Walk** - collect every regular file under the root
//! 2. **Group** - hash each file and index it by digest
//! 3. **Report** - keep digests shared by two or more files
//!
//! Failures from the first two steps are handed to a [`FailureSink`] as
//! they happen and counted for the [`ScanSummary`]; they never end the run.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(4));
//! let result = finder.find_duplicates(Path::new("/some/path")).unwrap();
//!
//! println!("Found {} duplicate groups", result.report.count);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{group_by_digest, report, DuplicateReport, GroupConfig, ScanOutcome};
use crate::progress::{ProgressCallback, PHASE_WALKING};
use crate::scanner::{CountingSink, FailureSink, Hasher, LogSink, ScanFailure, Walker, WalkerConfig};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of I/O threads for parallel hashing.
    pub io_threads: usize,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("walker_config", &self.walker_config)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: super::DEFAULT_IO_THREADS,
            walker_config: WalkerConfig::default(),
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the number of hashing threads (minimum 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Regular files discovered by the walk
    pub total_files: usize,
    /// Files hashed successfully
    pub hashed_files: usize,
    /// Directories (or the root) that could not be traversed
    pub traversal_failures: usize,
    /// Files that could not be read for hashing
    pub read_failures: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups (members beyond the first)
    pub duplicate_files: usize,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Whether files were found but every one of them failed to hash.
    ///
    /// The terminal message for this case is still "no duplicates found".
    #[must_use]
    pub fn all_reads_failed(&self) -> bool {
        self.total_files > 0 && self.hashed_files == 0 && self.read_failures > 0
    }
}

/// Everything a completed scan produced.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Root that was scanned
    pub root: PathBuf,
    /// Duplicate groups and their count
    pub report: DuplicateReport,
    /// Terminal classification
    pub outcome: ScanOutcome,
    /// Counters for the run
    pub summary: ScanSummary,
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The provided path does not exist.
    #[error("directory {} does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Duplicate finder that orchestrates the scan pipeline.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let mut hasher = Hasher::new();
        if let Some(ref flag) = config.shutdown_flag {
            hasher = hasher.with_shutdown_flag(flag.clone());
        }
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find duplicates under `path`, logging every failure.
    ///
    /// # Errors
    ///
    /// See [`find_duplicates_with_sink`](Self::find_duplicates_with_sink).
    pub fn find_duplicates(&self, path: &Path) -> Result<ScanResult, FinderError> {
        self.find_duplicates_with_sink(path, &LogSink)
    }

    /// Find duplicates under `path`, sending every failure to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist
    /// - The path is not a directory
    /// - The scan is interrupted by shutdown signal
    ///
    /// Unreadable subdirectories and files are not errors; they are
    /// reported to `sink` and skipped.
    pub fn find_duplicates_with_sink<S: FailureSink + ?Sized>(
        &self,
        path: &Path,
        sink: &S,
    ) -> Result<ScanResult, FinderError> {
        let start_time = Instant::now();

        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }
        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let counting = CountingSink::new(|failure: ScanFailure| sink.report(failure));

        log::info!("searching {} for files ...", path.display());
        let files = self.walk(path, &counting);
        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let mut summary = ScanSummary {
            total_files: files.len(),
            ..Default::default()
        };

        if files.is_empty() {
            summary.traversal_failures = counting.traversal_failures();
            summary.scan_duration = start_time.elapsed();
            let report = DuplicateReport::default();
            return Ok(ScanResult {
                root: path.to_path_buf(),
                outcome: ScanOutcome::classify(0, &report),
                report,
                summary,
            });
        }

        log::info!("processing {} files for duplicates ...", files.len());

        let group_config = GroupConfig {
            io_threads: self.config.io_threads,
            shutdown_flag: self.config.shutdown_flag.clone(),
            progress_callback: self.config.progress_callback.clone(),
        };
        let (index, group_stats) = group_by_digest(files, &self.hasher, &group_config, &counting);

        if group_stats.interrupted || self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let report = report(&index);

        summary.hashed_files = group_stats.hashed_files;
        summary.traversal_failures = counting.traversal_failures();
        summary.read_failures = counting.read_failures();
        summary.duplicate_groups = report.count;
        summary.duplicate_files = report.duplicate_files();
        summary.scan_duration = start_time.elapsed();

        log::debug!(
            "Scan complete: {} duplicate groups, {} duplicate files, {} failures in {:?}",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.traversal_failures + summary.read_failures,
            summary.scan_duration
        );

        Ok(ScanResult {
            root: path.to_path_buf(),
            outcome: ScanOutcome::classify(summary.total_files, &report),
            report,
            summary,
        })
    }

    fn walk<S: FailureSink + ?Sized>(&self, path: &Path, sink: &S) -> Vec<PathBuf> {
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_WALKING, 0);
        }

        let mut walker = Walker::new(path, self.config.walker_config.clone());
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(flag.clone());
        }
        let files = walker.scan(sink);

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_WALKING);
        }
        files
    }
}
