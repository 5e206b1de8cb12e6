//! Directory walker implementation using jwalk.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting every regular file below the root. It uses
//! [`jwalk`] for parallel directory reading while still yielding entries in
//! a stable, name-sorted order.
//!
//! # Failure handling
//!
//! A directory that cannot be read is reported once and skipped; the walk
//! carries on with its siblings. An unreadable root yields a single error
//! and an otherwise empty walk.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use jwalk::WalkDir;

use super::{FailureSink, ScanError, ScanFailure, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker stops yielding entries.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Walk the directory tree and collect regular-file paths.
    ///
    /// Every traversal error is handed to `sink` as a
    /// [`ScanFailure::Traversal`] and the walk continues. An empty result
    /// is a normal outcome.
    pub fn scan<S: FailureSink + ?Sized>(&self, sink: &S) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in self.walk() {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => sink.report(ScanFailure::Traversal(e)),
            }
        }
        log::debug!(
            "Walker: {} files under {}",
            files.len(),
            self.root.display()
        );
        files
    }

    /// Walk the directory tree, yielding regular-file paths.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration. Each failing directory is yielded at most once.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        // An unreadable root ends the walk with one error.
        let root_error = std::fs::metadata(&self.root)
            .err()
            .map(|e| ScanError::from_io(&self.root, e));

        let walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .skip_hidden(false)
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                // Sort children for deterministic output
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        let entries = if root_error.is_some() {
            None
        } else {
            Some(walk_dir.into_iter())
        };
        let mut reported: HashSet<PathBuf> = HashSet::new();

        let walked = entries
            .into_iter()
            .flatten()
            .take_while(move |_| {
                if self.is_shutdown_requested() {
                    log::debug!("Walker: Shutdown requested, stopping iteration");
                    false
                } else {
                    true
                }
            })
            .filter_map(move |entry_result| match entry_result {
                Ok(mut entry) => {
                    let path = entry.path();

                    if entry.file_type().is_dir() {
                        let error = entry.read_children_error.take()?;
                        return self.report_once(&mut reported, path, error);
                    }

                    self.classify_file(path, entry.file_type().is_symlink())
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), std::borrow::ToOwned::to_owned);
                    self.report_once(&mut reported, path, e)
                }
            });

        root_error.map(Err).into_iter().chain(walked)
    }

    /// Decide whether a non-directory entry is a regular file.
    fn classify_file(&self, path: PathBuf, is_symlink: bool) -> Option<Result<PathBuf, ScanError>> {
        if is_symlink && !self.config.follow_symlinks {
            log::trace!("Skipping symlink: {}", path.display());
            return None;
        }

        // Followed links report the target's type, so resolve them too.
        let metadata = if is_symlink || self.config.follow_symlinks {
            std::fs::metadata(&path)
        } else {
            std::fs::symlink_metadata(&path)
        };

        match metadata {
            Ok(m) if m.is_file() => Some(Ok(path)),
            Ok(_) => {
                log::trace!("Skipping non-regular entry: {}", path.display());
                None
            }
            Err(e) => Some(Err(self.handle_io_error(&path, e))),
        }
    }

    /// Convert a jwalk error, suppressing repeats for the same path.
    fn report_once(
        &self,
        reported: &mut HashSet<PathBuf>,
        path: PathBuf,
        error: jwalk::Error,
    ) -> Option<Result<PathBuf, ScanError>> {
        if !reported.insert(path.clone()) {
            return None;
        }
        Some(Err(self.handle_jwalk_error(path, error)))
    }

    /// Handle I/O errors during file access.
    fn handle_io_error(&self, path: &Path, error: std::io::Error) -> ScanError {
        match error.kind() {
            std::io::ErrorKind::NotFound => {
                log::debug!("File not found (may have been deleted): {}", path.display());
            }
            _ => log::debug!("I/O error for {}: {}", path.display(), error),
        }
        ScanError::from_io(path, error)
    }

    /// Handle jwalk errors.
    fn handle_jwalk_error(&self, path: PathBuf, error: jwalk::Error) -> ScanError {
        log::debug!("Walker error for {}: {}", path.display(), error);
        let kind = error
            .io_error()
            .map_or(std::io::ErrorKind::Other, std::io::Error::kind);
        ScanError::from_io(&path, std::io::Error::new(kind, error.to_string()))
    }
}
