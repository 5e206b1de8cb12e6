//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/root",
//!   "outcome": "duplicates",
//!   "duplicates": [
//!     {
//!       "hash": "af1349b9f5f9a1a6a0404dea36dcc949...",
//!       "count": 2,
//!       "files": ["/root/a.txt", "/root/b.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 3,
//!     "hashed_files": 3,
//!     "traversal_failures": 0,
//!     "read_failures": 0,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "scan_duration_ms": 12
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::DuplicateFinder;
//! use dupfind::output::json::JsonOutput;
//! use std::path::Path;
//!
//! let result = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//!
//! println!("{}", JsonOutput::new(&result).to_json_pretty().unwrap());
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanResult, ScanSummary};

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// BLAKE3 hash as hexadecimal string (64 characters)
    pub hash: String,
    /// Number of files sharing the hash
    pub count: usize,
    /// Member paths in discovery order
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a [`DuplicateGroup`].
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.digest_hex(),
            count: group.len(),
            files: group
                .files
                .iter()
                .map(|f| f.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Regular files found by the walk
    pub total_files: usize,
    /// Files hashed successfully
    pub hashed_files: usize,
    /// Directories that could not be listed
    pub traversal_failures: usize,
    /// Files that could not be read
    pub read_failures: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups
    pub duplicate_files: usize,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(summary: &ScanSummary) -> Self {
        Self {
            total_files: summary.total_files,
            hashed_files: summary.hashed_files,
            traversal_failures: summary.traversal_failures,
            read_failures: summary.read_failures,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            scan_duration_ms: u64::try_from(summary.scan_duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Directory that was scanned
    pub root: String,
    /// `no_files`, `no_duplicates` or `duplicates`
    pub outcome: &'static str,
    /// List of duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON view of a completed scan.
    #[must_use]
    pub fn new(result: &ScanResult) -> Self {
        Self {
            root: result.root.to_string_lossy().into_owned(),
            outcome: result.outcome.name(),
            duplicates: result
                .report
                .groups
                .iter()
                .map(JsonDuplicateGroup::from_duplicate_group)
                .collect(),
            summary: JsonSummary::from(&result.summary),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
