//! Duplicate selection from a completed [`FingerprintIndex`].
//!
//! [`report`] is a pure transform: it keeps every digest with two or more
//! files and counts them. Printing is left to [`crate::output`].

use std::path::PathBuf;

use super::FingerprintIndex;
use crate::scanner::{digest_to_hex, Digest};

/// Files that share one content digest (always two or more).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// BLAKE3 digest of the shared content
    pub digest: Digest,
    /// Member paths in discovery order
    pub files: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always `false` for groups produced by [`report`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of redundant copies (members beyond the first).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Digest as hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        digest_to_hex(&self.digest)
    }
}

/// Result of selecting duplicate groups from an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    /// Groups ordered by the first-seen order of their digest
    pub groups: Vec<DuplicateGroup>,
    /// Number of duplicate groups
    pub count: usize,
}

impl DuplicateReport {
    /// Total redundant copies across all groups.
    #[must_use]
    pub fn duplicate_files(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::duplicate_count).sum()
    }
}

/// Terminal classification of a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The walk found no regular files at all.
    NoFiles,
    /// Files were found but no content was shared.
    NoDuplicates,
    /// This many duplicate groups were found.
    Duplicates(usize),
}

impl ScanOutcome {
    /// Classify a run from the number of discovered files and the report.
    #[must_use]
    pub fn classify(files_found: usize, report: &DuplicateReport) -> Self {
        if files_found == 0 {
            Self::NoFiles
        } else if report.count == 0 {
            Self::NoDuplicates
        } else {
            Self::Duplicates(report.count)
        }
    }

    /// Machine-readable name used in JSON output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::NoFiles => "no_files",
            Self::NoDuplicates => "no_duplicates",
            Self::Duplicates(_) => "duplicates",
        }
    }
}

/// Select every digest shared by two or more files.
///
/// A group appears in the result if and only if it has at least two
/// members.
#[must_use]
pub fn report(index: &FingerprintIndex) -> DuplicateReport {
    let groups: Vec<DuplicateGroup> = index
        .iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(digest, files)| DuplicateGroup {
            digest: *digest,
            files: files.to_vec(),
        })
        .collect();

    DuplicateReport {
        count: groups.len(),
        groups,
    }
}
