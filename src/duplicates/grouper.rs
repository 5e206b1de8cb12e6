//! Content grouping: hash every discovered file and index it by digest.
//!
//! # Overview
//!
//! [`group_by_digest`] hashes each path and records it in a
//! [`FingerprintIndex`]. A file that cannot be read is reported to the
//! [`FailureSink`] and left out; it never stops the remaining files from
//! being processed.
//!
//! Hashing runs on a bounded rayon pool. Results are gathered in input
//! order and inserted by a single writer, so each digest's path list is in
//! discovery order no matter how the threads were scheduled.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::{group_by_digest, GroupConfig};
//! use dupfind::scanner::{Hasher, LogSink, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let files = Walker::new(Path::new("."), WalkerConfig::default()).scan(&LogSink);
//! let (index, stats) = group_by_digest(files, &Hasher::new(), &GroupConfig::default(), &LogSink);
//! println!("{} distinct contents, {} files failed", index.len(), stats.failed_files);
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use super::FingerprintIndex;
use crate::progress::{ProgressCallback, PHASE_HASHING};
use crate::scanner::{Digest, FailureSink, Hasher, ScanFailure};

/// Default number of hashing threads.
pub const DEFAULT_IO_THREADS: usize = 4;

/// Configuration for the grouping phase.
#[derive(Clone)]
pub struct GroupConfig {
    /// Number of I/O threads for parallel hashing. `1` hashes sequentially.
    pub io_threads: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for GroupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupConfig")
            .field("io_threads", &self.io_threads)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            io_threads: DEFAULT_IO_THREADS,
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl GroupConfig {
    /// Set the number of hashing threads (minimum 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
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

/// Statistics from the grouping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupStats {
    /// Paths handed to the grouper
    pub input_files: usize,
    /// Paths hashed and recorded in the index
    pub hashed_files: usize,
    /// Paths whose content could not be read
    pub failed_files: usize,
    /// Paths skipped because shutdown was requested
    pub skipped_files: usize,
    /// Whether the phase was cut short by shutdown
    pub interrupted: bool,
}

enum HashOutcome {
    Hashed(Digest),
    Failed,
    Skipped,
}

/// Hash every path and index it by content digest.
///
/// Paths are processed in input order as far as the index is concerned.
/// Read failures go to `sink` as [`ScanFailure::Read`] immediately and the
/// failing path is excluded from every group.
///
/// # Returns
///
/// The completed [`FingerprintIndex`] and [`GroupStats`] for the run.
pub fn group_by_digest<S: FailureSink + ?Sized>(
    paths: Vec<PathBuf>,
    hasher: &Hasher,
    config: &GroupConfig,
    sink: &S,
) -> (FingerprintIndex, GroupStats) {
    let mut stats = GroupStats {
        input_files: paths.len(),
        ..Default::default()
    };
    let mut index = FingerprintIndex::new();

    if paths.is_empty() {
        log::debug!("Grouping: No files to process");
        return (index, stats);
    }

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_start(PHASE_HASHING, paths.len());
    }

    log::debug!(
        "Grouping: hashing {} files with {} thread(s)",
        paths.len(),
        config.io_threads
    );

    let completed = AtomicUsize::new(0);
    let hash_one = |path: &PathBuf| -> HashOutcome {
        if config.is_shutdown_requested() {
            return HashOutcome::Skipped;
        }

        let result = hasher.hash_file(path);

        if let Some(ref callback) = config.progress_callback {
            let current = completed.fetch_add(1, Ordering::Relaxed) + 1;
            callback.on_progress(current, path.to_string_lossy().as_ref());
        }

        match result {
            Ok(digest) => {
                log::trace!("Hashed: {}", path.display());
                HashOutcome::Hashed(digest)
            }
            Err(e) => {
                sink.report(ScanFailure::Read(e));
                HashOutcome::Failed
            }
        }
    };

    let outcomes: Vec<HashOutcome> = if config.io_threads <= 1 {
        paths.iter().map(hash_one).collect()
    } else {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.io_threads)
            .build()
        {
            Ok(pool) => pool.install(|| paths.par_iter().map(hash_one).collect()),
            Err(e) => {
                log::warn!("Failed to create hashing thread pool, hashing sequentially: {e}");
                paths.iter().map(hash_one).collect()
            }
        }
    };

    // Single writer: insertion follows input order.
    for (path, outcome) in paths.into_iter().zip(outcomes) {
        match outcome {
            HashOutcome::Hashed(digest) => {
                if index.insert(digest, path) {
                    stats.hashed_files += 1;
                }
            }
            HashOutcome::Failed => stats.failed_files += 1,
            HashOutcome::Skipped => stats.skipped_files += 1,
        }
    }

    if config.is_shutdown_requested() {
        stats.interrupted = true;
        log::info!("Grouping: Interrupted by shutdown signal");
    }

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_end(PHASE_HASHING);
    }

    log::debug!(
        "Grouping complete: {} files → {} distinct contents ({} failed)",
        stats.input_files,
        index.len(),
        stats.failed_files
    );

    (index, stats)
}
