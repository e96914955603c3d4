//! In-memory storage backend for testing.

use crate::StorageBackend;
use crate::error::{ErrorKind, Result};
use crate::models::FolderEntry;
use crate::path::validate as validate_path;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Operations of [`StorageBackend`] that can be made to fail on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListFolders,
    ListFiles,
    Rename,
    Move,
    Remove,
}

#[derive(Debug, Clone)]
enum Node {
    Folder,
    File(Vec<u8>),
}

/// In-memory storage backend for testing.
///
/// Entries are kept in insertion order, so [`list_folders`](StorageBackend::list_folders)
/// returns folders in the order they were added. That makes the effect of
/// listing order on a run reproducible, which the filesystem never is.
///
/// Failures can be injected per operation and path with
/// [`with_failure`](Self::with_failure).
///
/// # Examples
///
/// ```
/// use datedirs_storage::StorageBackend;
/// use datedirs_storage::backend::{MockBackend, Operation};
/// use std::path::Path;
///
/// let backend = MockBackend::default()
///     .with_file("5 maja 2021/IMG_0001.jpg", b"jpeg")
///     .with_folder("2021-05-05")
///     .with_failure(Operation::Remove, "5 maja 2021");
/// assert!(backend.exists(Path::new("5 maja 2021/IMG_0001.jpg")).unwrap());
/// assert!(backend.remove_folder(Path::new("5 maja 2021")).is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockBackend {
    entries: RwLock<Vec<(PathBuf, Node)>>,
    failures: HashSet<(Operation, PathBuf)>,
}

impl MockBackend {
    /// Add a folder, and any missing parent folders.
    ///
    /// Panics if the path fails validation. If test setup is wrong, then the
    /// test should not pass.
    pub fn with_folder(mut self, path: impl AsRef<Path>) -> Self {
        let path = Self::validated(path.as_ref());
        Self::insert_folder(self.entries.get_mut().unwrap_or_else(PoisonError::into_inner), &path);
        self
    }

    /// Add a file, and any missing parent folders. Panics on an invalid path.
    pub fn with_file(mut self, path: impl AsRef<Path>, data: impl Into<Vec<u8>>) -> Self {
        let path = Self::validated(path.as_ref());
        let entries = self.entries.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::insert_folder(entries, parent);
        }
        entries.retain(|(existing, _)| existing != &path);
        entries.push((path, Node::File(data.into())));
        self
    }

    /// Make `operation` fail whenever it is called with `path`. Listing the
    /// root folder ignores the path.
    pub fn with_failure(mut self, operation: Operation, path: impl AsRef<Path>) -> Self {
        let path = match operation {
            Operation::ListFolders => PathBuf::new(),
            _ => path.as_ref().to_path_buf(),
        };
        self.failures.insert((operation, path));
        self
    }

    /// Contents of a file, if there is a file at `path`.
    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let path = validate_path(path).ok()?;
        self.entries().iter().find_map(|(existing, node)| match node {
            Node::File(data) if existing == &path => Some(data.clone()),
            _ => None,
        })
    }

    /// Every entry below `folder`, files and folders, at any depth.
    pub fn contents(&self, folder: impl AsRef<Path>) -> Vec<PathBuf> {
        let folder = folder.as_ref();
        self.entries()
            .iter()
            .filter(|(path, _)| path != folder && path.starts_with(folder))
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn validated(path: &Path) -> PathBuf {
        let Ok(validated) = validate_path(path) else {
            // The panic here is DELIBERATE. MockBackend is intended to be
            // used in tests; panics are expected. There is no error result.
            panic!("MockBackend: invalid path {}", path.display());
        };
        validated
    }

    fn insert_folder(entries: &mut Vec<(PathBuf, Node)>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if !entries.iter().any(|(existing, _)| existing == &current) {
                entries.push((current.clone(), Node::Folder));
            }
        }
    }

    fn entries(&self) -> std::sync::RwLockReadGuard<'_, Vec<(PathBuf, Node)>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn entries_mut(&self) -> std::sync::RwLockWriteGuard<'_, Vec<(PathBuf, Node)>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self, operation: Operation, path: &Path) -> Result<()> {
        if self.failures.contains(&(operation, path.to_path_buf())) {
            exn::bail!(ErrorKind::BackendError(format!("injected {operation:?} failure for {}", path.display())));
        }
        Ok(())
    }

    fn is_folder(entries: &[(PathBuf, Node)], path: &Path) -> bool {
        entries.iter().any(|(existing, node)| existing == path && matches!(node, Node::Folder))
    }
}

impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn list_folders(&self) -> Result<Vec<FolderEntry>> {
        self.check(Operation::ListFolders, Path::new(""))?;
        Ok(self
            .entries()
            .iter()
            .filter(|(path, node)| matches!(node, Node::Folder) && path.components().count() == 1)
            .map(|(path, _)| FolderEntry::new(path.to_string_lossy()))
            .collect())
    }

    fn list_files(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let folder = validate_path(folder)?;
        self.check(Operation::ListFiles, &folder)?;
        let entries = self.entries();
        if !Self::is_folder(&entries, &folder) {
            exn::bail!(ErrorKind::NotFound(folder));
        }
        Ok(entries
            .iter()
            .filter(|(path, node)| matches!(node, Node::File(_)) && path.parent() == Some(folder.as_path()))
            .map(|(path, _)| path.clone())
            .collect())
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        Ok(self.entries().iter().any(|(existing, _)| existing == &path))
    }

    fn rename_folder(&self, from: &Path, to: &Path) -> Result<()> {
        let from = validate_path(from)?;
        let to = validate_path(to)?;
        self.check(Operation::Rename, &from)?;
        let mut entries = self.entries_mut();
        if !Self::is_folder(&entries, &from) {
            exn::bail!(ErrorKind::NotFound(from));
        }
        if entries.iter().any(|(existing, _)| existing == &to) {
            exn::bail!(ErrorKind::AlreadyExists(to));
        }
        for (path, _) in entries.iter_mut() {
            let renamed = match path.strip_prefix(&from) {
                Ok(rest) if rest.as_os_str().is_empty() => to.clone(),
                Ok(rest) => to.join(rest),
                Err(_) => continue,
            };
            *path = renamed;
        }
        Ok(())
    }

    fn move_file(&self, file: &Path, folder: &Path) -> Result<PathBuf> {
        let file = validate_path(file)?;
        let folder = validate_path(folder)?;
        self.check(Operation::Move, &file)?;
        let Some(file_name) = file.file_name() else {
            exn::bail!(ErrorKind::InvalidPath(file));
        };
        let target = folder.join(file_name);
        let mut entries = self.entries_mut();
        if !Self::is_folder(&entries, &folder) {
            exn::bail!(ErrorKind::NotFound(folder));
        }
        let Some(index) = entries.iter().position(|(path, node)| path == &file && matches!(node, Node::File(_)))
        else {
            exn::bail!(ErrorKind::NotFound(file));
        };
        let (_, node) = entries.remove(index);
        entries.retain(|(existing, _)| existing != &target);
        entries.push((target.clone(), node));
        Ok(target)
    }

    fn remove_folder(&self, folder: &Path) -> Result<()> {
        let folder = validate_path(folder)?;
        self.check(Operation::Remove, &folder)?;
        let mut entries = self.entries_mut();
        if !Self::is_folder(&entries, &folder) {
            exn::bail!(ErrorKind::NotFound(folder));
        }
        if entries.iter().any(|(path, _)| path != &folder && path.starts_with(&folder)) {
            exn::bail!(ErrorKind::NotEmpty(folder));
        }
        entries.retain(|(path, _)| path != &folder);
        Ok(())
    }
}
