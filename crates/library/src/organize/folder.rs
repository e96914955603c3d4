use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::organize::error::{ErrorKind as OrganizeErrorKind, Result as OrganizeResult};
use crate::organize::merge::merge_into;
use crate::registry::Registry;
use datedirs_extract::models::MonthLexicon;
use datedirs_storage::{FolderEntry, StorageBackend};
use exn::ResultExt;
use std::path::PathBuf;

/// The outcome of (successfully) organizing a single folder.
///
/// Failures are not an `Action`; they come back as an error carrying the
/// folder's path. Consumers can pattern-match to decide whether to log,
/// report progress, or take further action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Folder was renamed to its canonical name, which is now registered.
    Renamed(PathBuf),
    /// Folder's files were moved into the canonical folder and the emptied
    /// folder was deleted.
    Merged(PathBuf),
    /// Folder's files were moved into the canonical folder, but the folder
    /// itself could not be deleted (usually because it has subfolders) and
    /// is still on disk.
    MergeIncomplete(PathBuf),
    /// Folder name has no space, so it isn't an exported date phrase (this
    /// includes folders that are already canonical). Left untouched.
    Skipped(PathBuf),
}

/// Moves a single folder to its canonical `YYYY-MM-DD` name, or merges it
/// into the folder that already took that name during this run.
///
/// - **[`Action::Skipped`]**: the name contains no space.
/// - **[`Action::Renamed`]**: first folder seen for its date.
/// - **[`Action::Merged`]** / **[`Action::MergeIncomplete`]**: the date is
///   already in the `registry`; see [`merge_into`].
///
/// # Errors
/// Returns [`Exn<LibraryErrorKind::Organize>`](LibraryErrorKind::Organize)
/// with the folder's path, raised from an inner
/// [`Exn<OrganizeErrorKind>`](OrganizeErrorKind).
pub fn organize_folder(
    backend: &dyn StorageBackend,
    lexicon: &MonthLexicon,
    registry: &mut Registry,
    folder: &FolderEntry,
) -> LibraryResult<Action> {
    organize_folder_inner(backend, lexicon, registry, folder)
        .or_raise(|| LibraryErrorKind::Organize(folder.path.clone()))
}

pub(crate) fn organize_folder_inner(
    backend: &dyn StorageBackend,
    lexicon: &MonthLexicon,
    registry: &mut Registry,
    folder: &FolderEntry,
) -> OrganizeResult<Action> {
    if !folder.name.contains(' ') {
        tracing::debug!(folder = %folder.name, "Folder name has no space; skipping");
        return Ok(Action::Skipped(folder.path.clone()));
    }

    let date = datedirs_extract::parse(&folder.name, lexicon).or_raise(|| OrganizeErrorKind::Parse)?;
    let target = date.folder();
    tracing::info!(from = %folder.name, to = %date, "Translated folder name");

    if registry.contains(&target) {
        return merge_into(backend, folder, &target);
    }

    // Only register on success; a folder that failed to rename must not turn
    // later folders for the same date into merges.
    backend.rename_folder(&folder.path, &target).or_raise(|| OrganizeErrorKind::Rename)?;
    registry.insert(target.clone());
    Ok(Action::Renamed(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use datedirs_storage::backend::{MockBackend, Operation};
    use std::ops::Deref;
    use std::path::Path;

    fn run(backend: &MockBackend, registry: &mut Registry, name: &str) -> LibraryResult<Action> {
        organize_folder(backend, &MonthLexicon::default(), registry, &FolderEntry::new(name))
    }

    #[test]
    fn test_first_folder_is_renamed_and_registered() {
        let backend = MockBackend::default().with_file("5 maja 2021/a.jpg", b"a");
        let mut registry = Registry::new();
        let action = run(&backend, &mut registry, "5 maja 2021").unwrap();
        assert_eq!(action, Action::Renamed(PathBuf::from("2021-05-05")));
        assert!(registry.contains("2021-05-05"));
        assert_eq!(backend.read("2021-05-05/a.jpg"), Some(b"a".to_vec()));
    }

    #[test]
    fn test_registered_date_is_merged() {
        let backend =
            MockBackend::default().with_file("2021-05-05/a.jpg", b"a").with_file("IMG, 5 maja 2021/b.jpg", b"b");
        let mut registry = Registry::new();
        registry.insert("2021-05-05");
        let action = run(&backend, &mut registry, "IMG, 5 maja 2021").unwrap();
        assert_eq!(action, Action::Merged(PathBuf::from("2021-05-05")));
        assert_eq!(backend.read("2021-05-05/b.jpg"), Some(b"b".to_vec()));
        assert!(!backend.exists(Path::new("IMG, 5 maja 2021")).unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_no_space_is_skipped() {
        let backend = MockBackend::default().with_folder("2021-05-05").with_folder("Wakacje");
        let mut registry = Registry::new();
        for name in ["2021-05-05", "Wakacje"] {
            let action = run(&backend, &mut registry, name).unwrap();
            assert_eq!(action, Action::Skipped(PathBuf::from(name)));
        }
        assert!(registry.is_empty());
        assert!(backend.exists(Path::new("Wakacje")).unwrap());
    }

    #[test]
    fn test_unparseable_name_fails_without_touching_anything() {
        let backend = MockBackend::default().with_folder("5 May 2021");
        let mut registry = Registry::new();
        let err = run(&backend, &mut registry, "5 May 2021").unwrap_err();
        assert!(matches!(err.deref(), LibraryErrorKind::Organize(path) if path == Path::new("5 May 2021")));
        assert!(registry.is_empty());
        assert!(backend.exists(Path::new("5 May 2021")).unwrap());
    }

    #[test]
    fn test_failed_rename_is_not_registered() {
        let backend = MockBackend::default().with_folder("5 maja 2021").with_failure(Operation::Rename, "5 maja 2021");
        let mut registry = Registry::new();
        assert!(run(&backend, &mut registry, "5 maja 2021").is_err());
        assert!(!registry.contains("2021-05-05"));
    }

    #[test]
    fn test_canonical_folder_already_on_disk_is_not_overwritten() {
        let backend = MockBackend::default().with_file("2021-05-05/a.jpg", b"old").with_folder("5 maja 2021");
        let mut registry = Registry::new();
        assert!(run(&backend, &mut registry, "5 maja 2021").is_err());
        assert!(registry.is_empty());
        assert_eq!(backend.read("2021-05-05/a.jpg"), Some(b"old".to_vec()));
        assert!(backend.exists(Path::new("5 maja 2021")).unwrap());
    }
}
