//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Recursive directory walking using jwalk
//! - Content hashing with BLAKE3
//! - Fire-and-forget failure reporting through [`FailureSink`]
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupfind::scanner::{LogSink, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! let files = walker.scan(&LogSink);
//! println!("Found {} files", files.len());
//! ```

pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

// Re-export main types
pub use hasher::{digest_to_hex, Digest, Hasher, DEFAULT_BUFFER_SIZE};
pub use walker::Walker;

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// Warning: May cause infinite loops with symlink cycles.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file or directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised while accessing `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Hashing was abandoned because shutdown was requested.
    #[error("Hashing interrupted: {0}")]
    Interrupted(PathBuf),
}

impl HashError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Interrupted(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

/// A single enumeration or hashing failure.
///
/// Failures are handed to a [`FailureSink`] the moment they happen and are
/// never collected by the scanner or the grouper.
#[derive(thiserror::Error, Debug)]
pub enum ScanFailure {
    /// A directory (or the root itself) could not be traversed.
    #[error("cannot traverse {}: {0}", .0.path().display())]
    Traversal(#[source] ScanError),

    /// A file could not be fully read for hashing.
    #[error("cannot hash {}: {0}", .0.path().display())]
    Read(#[source] HashError),
}

impl ScanFailure {
    /// The offending path (the root for root-level traversal failures).
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Traversal(e) => e.path(),
            Self::Read(e) => e.path(),
        }
    }

    /// Whether this failure came from traversal rather than hashing.
    #[must_use]
    pub fn is_traversal(&self) -> bool {
        matches!(self, Self::Traversal(_))
    }
}

/// Receiver for failure events.
///
/// Implementations must tolerate being called from several hashing threads
/// at once.
pub trait FailureSink: Send + Sync {
    /// Handle one failure. Must not panic.
    fn report(&self, failure: ScanFailure);
}

impl<F> FailureSink for F
where
    F: Fn(ScanFailure) + Send + Sync,
{
    fn report(&self, failure: ScanFailure) {
        self(failure);
    }
}

/// Sink that writes each failure to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl FailureSink for LogSink {
    fn report(&self, failure: ScanFailure) {
        match &failure {
            ScanFailure::Traversal(ScanError::NotFound(_))
            | ScanFailure::Read(HashError::NotFound(_)) => log::warn!("{failure}"),
            ScanFailure::Read(HashError::Interrupted(_)) => log::debug!("{failure}"),
            _ => log::error!("{failure}"),
        }
    }
}

/// Sink wrapper that counts failures by kind before forwarding them.
#[derive(Debug, Default)]
pub struct CountingSink<S> {
    inner: S,
    traversal: AtomicUsize,
    read: AtomicUsize,
}

impl<S: FailureSink> CountingSink<S> {
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            traversal: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
        }
    }

    /// Number of traversal failures seen so far.
    #[must_use]
    pub fn traversal_failures(&self) -> usize {
        self.traversal.load(Ordering::Relaxed)
    }

    /// Number of read failures seen so far.
    #[must_use]
    pub fn read_failures(&self) -> usize {
        self.read.load(Ordering::Relaxed)
    }
}

impl<S: FailureSink> FailureSink for CountingSink<S> {
    fn report(&self, failure: ScanFailure) {
        match &failure {
            ScanFailure::Traversal(_) => {
                self.traversal.fetch_add(1, Ordering::Relaxed);
            }
            // Interrupted reads are not failed files.
            ScanFailure::Read(HashError::Interrupted(_)) => {}
            ScanFailure::Read(_) => {
                self.read.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.inner.report(failure);
    }
}
