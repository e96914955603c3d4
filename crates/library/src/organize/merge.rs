use crate::organize::Action;
use crate::organize::error::{ErrorKind as OrganizeErrorKind, Result as OrganizeResult};
use datedirs_storage::error::ErrorKind as StorageErrorKind;
use datedirs_storage::{FolderEntry, StorageBackend};
use exn::ResultExt;
use std::path::Path;

/// Merges a duplicate-date `folder` into the canonical folder at `target`,
/// which an earlier folder in this run has already been renamed to.
///
/// **Merge strategy:**
/// 1. List the plain files directly inside `folder`. Subfolders are neither
///    descended into nor moved.
/// 2. Move each file into `target`, replacing a file of the same name
///    (last write wins).
/// 3. Delete `folder`. Deletion never recurses, so a folder with subfolders
///    left behind survives: that is reported as
///    [`Action::MergeIncomplete`] with a warning, not as an error.
///
/// A failure in steps 1 or 2 raises [`OrganizeErrorKind::Merge`]. Files
/// already moved stay moved; there is no rollback.
pub(crate) fn merge_into(backend: &dyn StorageBackend, folder: &FolderEntry, target: &Path) -> OrganizeResult<Action> {
    tracing::info!(from = %folder.path.display(), to = %target.display(), "Folder already exists; copying contents");
    let files = backend.list_files(&folder.path).or_raise(|| OrganizeErrorKind::Merge)?;
    tracing::info!(folder = %folder.name, files = files.len(), "Found files to move");
    for file in &files {
        backend.move_file(file, target).or_raise(|| OrganizeErrorKind::Merge)?;
    }

    tracing::info!(folder = %folder.name, "Deleting folder");
    match backend.remove_folder(&folder.path) {
        Ok(()) => Ok(Action::Merged(target.to_path_buf())),
        Err(err) => {
            let kind: &StorageErrorKind = &err;
            tracing::warn!(folder = %folder.name, error = %kind, "Could not delete merged folder; leaving it in place");
            Ok(Action::MergeIncomplete(target.to_path_buf()))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datedirs_storage::backend::{LocalBackend, MockBackend, Operation};
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_merge_moves_files_and_deletes_folder() {
        let backend = MockBackend::default()
            .with_file("2022-07-01/a.jpg", b"first")
            .with_file("1 lipca 2022/a.jpg", b"second")
            .with_file("1 lipca 2022/b.jpg", b"b");
        let action = merge_into(&backend, &FolderEntry::new("1 lipca 2022"), Path::new("2022-07-01")).unwrap();
        assert_eq!(action, Action::Merged(PathBuf::from("2022-07-01")));
        assert_eq!(backend.read("2022-07-01/a.jpg"), Some(b"second".to_vec()));
        assert_eq!(backend.read("2022-07-01/b.jpg"), Some(b"b".to_vec()));
        assert!(!backend.exists(Path::new("1 lipca 2022")).unwrap());
    }

    #[test]
    fn test_subfolder_is_left_behind() {
        let backend = MockBackend::default()
            .with_folder("2022-07-01")
            .with_file("1 lipca 2022/a.jpg", b"a")
            .with_file("1 lipca 2022/edited/a.jpg", b"edited");
        let action = merge_into(&backend, &FolderEntry::new("1 lipca 2022"), Path::new("2022-07-01")).unwrap();
        assert_eq!(action, Action::MergeIncomplete(PathBuf::from("2022-07-01")));
        assert_eq!(backend.read("2022-07-01/a.jpg"), Some(b"a".to_vec()));
        assert_eq!(
            backend.contents("1 lipca 2022"),
            vec![PathBuf::from("1 lipca 2022/edited"), PathBuf::from("1 lipca 2022/edited/a.jpg")]
        );
    }

    #[test]
    fn test_failed_move_keeps_partial_state() {
        let backend = MockBackend::default()
            .with_folder("2022-07-01")
            .with_file("1 lipca 2022/a.jpg", b"a")
            .with_file("1 lipca 2022/b.jpg", b"b")
            .with_failure(Operation::Move, "1 lipca 2022/b.jpg");
        let err = merge_into(&backend, &FolderEntry::new("1 lipca 2022"), Path::new("2022-07-01")).unwrap_err();
        assert!(matches!(&*err, OrganizeErrorKind::Merge));
        assert_eq!(backend.read("2022-07-01/a.jpg"), Some(b"a".to_vec()));
        assert_eq!(backend.read("1 lipca 2022/b.jpg"), Some(b"b".to_vec()));
    }

    #[test]
    fn test_merge_on_disk() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("2022-07-01")).unwrap();
        fs::create_dir_all(root.join("1 lipca 2022/nested")).unwrap();
        fs::write(root.join("2022-07-01/a.jpg"), "first").unwrap();
        fs::write(root.join("1 lipca 2022/a.jpg"), "second").unwrap();
        let backend = LocalBackend::new(root).unwrap();

        let action = merge_into(&backend, &FolderEntry::new("1 lipca 2022"), Path::new("2022-07-01")).unwrap();
        assert_eq!(action, Action::MergeIncomplete(PathBuf::from("2022-07-01")));
        assert_eq!(fs::read_to_string(root.join("2022-07-01/a.jpg")).unwrap(), "second");
        assert!(root.join("1 lipca 2022/nested").is_dir());
        assert!(!root.join("1 lipca 2022/a.jpg").exists());
    }
}
