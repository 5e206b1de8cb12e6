//! Digest-keyed index of scanned files.
//!
//! [`FingerprintIndex`] maps each content digest to the files that produced
//! it, in discovery order. It also remembers the order in which digests
//! were first seen so that iterating it is reproducible.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::scanner::Digest;

/// Mapping from content digest to the ordered list of matching paths.
///
/// Every path is stored under exactly one digest and at most once.
#[derive(Debug, Clone, Default)]
pub struct FingerprintIndex {
    entries: HashMap<Digest, Vec<PathBuf>>,
    order: Vec<Digest>,
    seen: HashSet<PathBuf>,
}

impl FingerprintIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` under `digest`.
    ///
    /// Returns `false` (and changes nothing) if `path` is already recorded.
    pub fn insert(&mut self, digest: Digest, path: PathBuf) -> bool {
        if !self.seen.insert(path.clone()) {
            log::trace!("Index: ignoring repeated path {}", path.display());
            return false;
        }
        match self.entries.entry(digest) {
            Entry::Occupied(mut slot) => slot.get_mut().push(path),
            Entry::Vacant(slot) => {
                self.order.push(digest);
                slot.insert(vec![path]);
            }
        }
        true
    }

    /// Paths recorded under `digest`, in discovery order.
    #[must_use]
    pub fn get(&self, digest: &Digest) -> Option<&[PathBuf]> {
        self.entries.get(digest).map(Vec::as_slice)
    }

    /// Whether `path` has been recorded.
    #[must_use]
    pub fn contains_path(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Number of distinct digests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no path has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of recorded paths.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.seen.len()
    }

    /// Iterate `(digest, paths)` in the order digests were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (&Digest, &[PathBuf])> + '_ {
        self.order.iter().filter_map(move |digest| {
            self.entries
                .get_key_value(digest)
                .map(|(d, paths)| (d, paths.as_slice()))
        })
    }
}
