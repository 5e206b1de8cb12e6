//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Content grouping (hash every file, index by digest)
//! - Duplicate selection and outcome classification
//! - Pipeline orchestration for one root

pub mod finder;
pub mod grouper;
pub mod index;
pub mod report;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanResult, ScanSummary};
pub use grouper::{group_by_digest, GroupConfig, GroupStats, DEFAULT_IO_THREADS};
pub use index::FingerprintIndex;
pub use report::{report, DuplicateGroup, DuplicateReport, ScanOutcome};
