//! Local filesystem storage backend.
//!
//! This module provides a storage backend implementation for the local
//! filesystem, using plain `std::fs` operations. Renames and moves stay on the
//! same filesystem as the root, so they reuse inodes instead of copying data.

use crate::error::{ErrorKind, Result};
use crate::models::FolderEntry;
use crate::{StorageBackend, path::validate as validate_path};
use std::fs::{self, DirEntry, Metadata};
use std::path::{Path, PathBuf};

/// Local filesystem storage backend.
///
/// Operates on an existing directory. All paths are relative to that root.
///
/// # Examples
///
/// ```no_run
/// use datedirs_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("/home/me/Pictures/Export")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalBackend {
    name: String,
    root: PathBuf,
}
impl LocalBackend {
    /// Open an existing directory as a storage root.
    ///
    /// Unlike most tools that write into a library, this never creates the
    /// root: a missing root means there is nothing to organize.
    ///
    /// # Errors
    /// [`NotFound`](ErrorKind::NotFound) or
    /// [`PermissionDenied`](ErrorKind::PermissionDenied) if the root can't be
    /// inspected, [`InvalidPath`](ErrorKind::InvalidPath) if it isn't a
    /// directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let metadata = fs::metadata(&root).map_err(|e| ErrorKind::from_io(e, &root))?;
        if !metadata.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self { name: root.display().to_string(), root })
    }

    /// Get the absolute path for a relative storage path.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    /// Follows symlinks; a broken symlink yields `None` and is dropped from
    /// listings.
    fn entry_metadata(entry: &DirEntry) -> Option<Metadata> {
        fs::metadata(entry.path()).ok()
    }

    #[cfg(windows)]
    fn is_hidden(name: &str, metadata: &Metadata) -> bool {
        use std::os::windows::fs::MetadataExt;
        const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
        name.starts_with('.') || metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
    }

    #[cfg(not(windows))]
    fn is_hidden(name: &str, _metadata: &Metadata) -> bool {
        name.starts_with('.')
    }
}

impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_folders(&self) -> Result<Vec<FolderEntry>> {
        let entries = fs::read_dir(&self.root).map_err(|e| ErrorKind::from_io(e, &self.root))?;
        let mut folders = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ErrorKind::from_io(e, &self.root))?;
            let Some(metadata) = Self::entry_metadata(&entry) else {
                continue;
            };
            if !metadata.is_dir() {
                continue;
            }
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy().into_owned();
            folders.push(FolderEntry {
                hidden: Self::is_hidden(&name, &metadata),
                path: PathBuf::from(&file_name),
                name,
            });
        }
        Ok(folders)
    }

    fn list_files(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let relative = validate_path(folder)?;
        let entries = fs::read_dir(self.root.join(&relative)).map_err(|e| ErrorKind::from_io(e, folder))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ErrorKind::from_io(e, folder))?;
            if Self::entry_metadata(&entry).is_some_and(|m| m.is_file()) {
                files.push(relative.join(entry.file_name()));
            }
        }
        Ok(files)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let abs_path = self.absolute_path(path)?;
        Ok(abs_path.try_exists().map_err(ErrorKind::Io)?)
    }

    fn rename_folder(&self, from: &Path, to: &Path) -> Result<()> {
        let from_path = self.absolute_path(from)?;
        let to_path = self.absolute_path(to)?;
        // `rename(2)` happily replaces an empty directory; refuse instead.
        if fs::symlink_metadata(&to_path).is_ok() {
            exn::bail!(ErrorKind::AlreadyExists(to.to_path_buf()));
        }
        Ok(fs::rename(&from_path, &to_path).map_err(|e| ErrorKind::from_io(e, from))?)
    }

    fn move_file(&self, file: &Path, folder: &Path) -> Result<PathBuf> {
        let Some(file_name) = file.file_name() else {
            exn::bail!(ErrorKind::InvalidPath(file.to_path_buf()));
        };
        let target = validate_path(folder)?.join(file_name);
        let from_path = self.absolute_path(file)?;
        // Replaces an existing file of the same name, on every platform.
        fs::rename(&from_path, self.root.join(&target)).map_err(|e| ErrorKind::from_io(e, file))?;
        Ok(target)
    }

    fn remove_folder(&self, folder: &Path) -> Result<()> {
        let abs_path = self.absolute_path(folder)?;
        Ok(fs::remove_dir(&abs_path).map_err(|e| ErrorKind::from_io(e, folder))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend_with(folders: &[&str], files: &[(&str, &str)]) -> (TempDir, LocalBackend) {
        let temp_dir = tempfile::tempdir().unwrap();
        for folder in folders {
            fs::create_dir_all(temp_dir.path().join(folder)).unwrap();
        }
        for (path, contents) in files {
            fs::write(temp_dir.path().join(path), contents).unwrap();
        }
        let backend = LocalBackend::new(temp_dir.path()).unwrap();
        (temp_dir, backend)
    }

    fn sorted_names(folders: Vec<FolderEntry>) -> Vec<String> {
        let mut names: Vec<_> = folders.into_iter().map(|f| f.name).collect();
        names.sort();
        names
    }

    #[test]
    fn test_new_requires_existing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(LocalBackend::new(temp_dir.path()).is_ok());
        let missing = LocalBackend::new(temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(&*missing, ErrorKind::NotFound(_)));
        fs::write(temp_dir.path().join("file.txt"), "data").unwrap();
        let not_dir = LocalBackend::new(temp_dir.path().join("file.txt")).unwrap_err();
        assert!(matches!(&*not_dir, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_absolute_path() {
        let (temp_dir, backend) = backend_with(&[], &[]);
        let expected = temp_dir.path().join("2020-01-12/a.jpg");
        assert_eq!(backend.absolute_path("2020-01-12/a.jpg").unwrap(), expected);
        // Path traversal is prevented
        assert!(backend.absolute_path("../etc/passwd").is_err());
    }

    #[test]
    fn test_list_folders_skips_files_and_flags_hidden() {
        let (_temp_dir, backend) =
            backend_with(&["12 stycznia 2020", ".thumbnails", "2020-01-13/nested"], &[("notes.txt", "data")]);
        let folders = backend.list_folders().unwrap();
        let hidden: Vec<_> = folders.iter().filter(|f| f.hidden).map(|f| f.name.as_str()).collect();
        assert_eq!(hidden, vec![".thumbnails"]);
        assert_eq!(sorted_names(folders), vec![".thumbnails", "12 stycznia 2020", "2020-01-13"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_folders_follows_symlinks() {
        let (temp_dir, backend) = backend_with(&["real"], &[]);
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("5 maja 2021")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), temp_dir.path().join("broken")).unwrap();
        assert_eq!(sorted_names(backend.list_folders().unwrap()), vec!["5 maja 2021", "real"]);
    }

    #[test]
    fn test_list_files_is_shallow() {
        let (_temp_dir, backend) =
            backend_with(&["a/sub"], &[("a/one.jpg", "1"), ("a/two.jpg", "2"), ("a/sub/three.jpg", "3")]);
        let mut files = backend.list_files(Path::new("a")).unwrap();
        files.sort();
        assert_eq!(files, vec![PathBuf::from("a/one.jpg"), PathBuf::from("a/two.jpg")]);
    }

    #[test]
    fn test_list_files_missing_folder() {
        let (_temp_dir, backend) = backend_with(&[], &[]);
        let err = backend.list_files(Path::new("missing")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_rename_folder() {
        let (_temp_dir, backend) = backend_with(&["5 maja 2021"], &[("5 maja 2021/a.jpg", "a")]);
        backend.rename_folder(Path::new("5 maja 2021"), Path::new("2021-05-05")).unwrap();
        assert!(!backend.exists(Path::new("5 maja 2021")).unwrap());
        assert!(backend.exists(Path::new("2021-05-05/a.jpg")).unwrap());
    }

    #[test]
    fn test_rename_folder_never_overwrites() {
        let (_temp_dir, backend) = backend_with(&["5 maja 2021", "2021-05-05"], &[]);
        let err = backend.rename_folder(Path::new("5 maja 2021"), Path::new("2021-05-05")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::AlreadyExists(_)));
        assert!(backend.exists(Path::new("5 maja 2021")).unwrap());
    }

    #[test]
    fn test_move_file_replaces_existing() {
        let (temp_dir, backend) = backend_with(&["src", "dst"], &[("src/a.jpg", "new"), ("dst/a.jpg", "old")]);
        let moved = backend.move_file(Path::new("src/a.jpg"), Path::new("dst")).unwrap();
        assert_eq!(moved, PathBuf::from("dst/a.jpg"));
        assert!(!backend.exists(Path::new("src/a.jpg")).unwrap());
        assert_eq!(fs::read_to_string(temp_dir.path().join("dst/a.jpg")).unwrap(), "new");
    }

    #[test]
    fn test_remove_folder() {
        let (_temp_dir, backend) = backend_with(&["empty", "full"], &[("full/a.jpg", "a")]);
        backend.remove_folder(Path::new("empty")).unwrap();
        assert!(!backend.exists(Path::new("empty")).unwrap());
        let err = backend.remove_folder(Path::new("full")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotEmpty(_)));
        assert!(backend.exists(Path::new("full/a.jpg")).unwrap());
    }

    #[test]
    fn test_path_security() {
        let (_temp_dir, backend) = backend_with(&["a"], &[]);
        assert!(backend.list_files(Path::new("../")).is_err());
        assert!(backend.rename_folder(Path::new("a"), Path::new("../a")).is_err());
        assert!(backend.remove_folder(Path::new("/tmp")).is_err());
    }
}
