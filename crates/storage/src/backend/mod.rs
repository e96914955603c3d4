//! Storage backend trait and implementations.
//!
//! This module defines the `StorageBackend` trait: the handful of folder and
//! file operations needed to normalize a directory of exported photo folders.
//! Operations are synchronous; a run visits folders one at a time and each
//! step depends on the previous one having finished.

mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::{MockBackend, Operation};
use crate::error::Result;
use crate::models::FolderEntry;
use std::path::{Path, PathBuf};

/// Unified interface for the folder being organized.
///
/// # Path Handling
/// All paths are relative to the storage root and are validated with
/// [`validate_path`](crate::validate_path) before use. Implementations should
/// enforce this validation.
///
/// # Examples
///
/// ```
/// use datedirs_storage::{StorageBackend, error::Result};
///
/// fn count_files_in_visible_folders(backend: &dyn StorageBackend) -> Result<usize> {
///     let mut count = 0;
///     for folder in backend.list_folders()?.into_iter().filter(|f| !f.hidden) {
///         count += backend.list_files(&folder.path)?.len();
///     }
///     Ok(count)
/// }
/// ```
pub trait StorageBackend {
    /// Human-readable location of the backend, used for logging only.
    fn name(&self) -> &str;

    /// List the folders directly under the root, hidden ones included.
    ///
    /// Order is whatever the underlying listing returns and must not be relied
    /// upon. Symlinks are followed; anything that isn't a folder is skipped.
    fn list_folders(&self) -> Result<Vec<FolderEntry>>;

    /// List the plain files directly inside `folder`, as root-relative paths.
    ///
    /// Subfolders are not descended into and are not returned.
    fn list_files(&self, folder: &Path) -> Result<Vec<PathBuf>>;

    /// Check if a file or folder exists.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Rename a folder.
    ///
    /// Never overwrites: returns
    /// [`AlreadyExists`](crate::error::ErrorKind::AlreadyExists) if anything
    /// is already at `to`, even an empty folder.
    fn rename_folder(&self, from: &Path, to: &Path) -> Result<()>;

    /// Move the file at `file` into `folder`, keeping its file name.
    ///
    /// A file of the same name in `folder` is replaced. Returns the new
    /// root-relative path of the file.
    fn move_file(&self, file: &Path, folder: &Path) -> Result<PathBuf>;

    /// Remove a folder, which must be empty.
    ///
    /// Never recurses; a folder with anything left in it yields
    /// [`NotEmpty`](crate::error::ErrorKind::NotEmpty).
    fn remove_folder(&self, folder: &Path) -> Result<()>;
}
