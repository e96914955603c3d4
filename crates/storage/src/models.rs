//! Storage models.

use std::path::PathBuf;

/// A folder directly under the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    /// Folder name as listed. Non-UTF-8 names are converted lossily; use
    /// [`path`](Self::path) for filesystem operations.
    pub name: String,
    /// Path relative to the storage root.
    pub path: PathBuf,
    /// Dot-prefixed, or carrying the hidden attribute on Windows.
    pub hidden: bool,
}
impl FolderEntry {
    /// Create an entry whose path is its name, inferring the hidden flag from
    /// a leading dot.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            hidden: name.starts_with('.'),
            name,
        }
    }
}
