use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Canonical folders produced so far in this run.
///
/// Membership decides between renaming and merging: the first folder for a
/// date is renamed to the canonical name and registered, every later folder
/// for the same date is merged into it. Folders that were already canonical
/// on disk before the run are *not* registered, and entries are never removed.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    targets: HashSet<PathBuf>,
}
impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, target: impl AsRef<Path>) -> bool {
        self.targets.contains(target.as_ref())
    }

    /// Record a canonical folder. Returns `false` if it was already known.
    pub fn insert(&mut self, target: impl Into<PathBuf>) -> bool {
        self.targets.insert(target.into())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
