use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::organize::Action;
use crate::organize::folder::organize_folder_inner;
use crate::registry::Registry;
use datedirs_extract::models::MonthLexicon;
use datedirs_storage::{FolderEntry, StorageBackend};
use exn::ResultExt;
use std::vec::IntoIter;

/// Progress events emitted by [`organize`] as it works through the root's
/// folders.
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started): exactly once.
/// 2. [`DiscoveryComplete`](Self::DiscoveryComplete): exactly once, with the
///    number of eligible (non-hidden) folders.
/// 3. [`Organized`](Self::Organized): zero or more times, one per folder
///    (a failed folder yields an `Err` item in its place).
/// 4. [`Complete`](Self::Complete): exactly once, signalling the run is
///    finished.
///
/// A discovery error terminates the iterator early, in which case
/// [`Complete`](Self::Complete) is never emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeEvent {
    /// Organizing has begun; emitted exactly once before any other event.
    Started,
    /// The root has been listed; the number of folders to visit is now known.
    DiscoveryComplete(u64),
    /// A folder has been organized.
    Organized(Action),
    /// Every discovered folder has been visited; the iterator is finished.
    Complete,
}

enum State {
    Start,
    Discover,
    Folders(IntoIter<FolderEntry>),
    Done,
}

/// Iterator returned by [`organize`].
pub struct Organize<'a> {
    backend: &'a dyn StorageBackend,
    lexicon: &'a MonthLexicon,
    registry: Registry,
    state: State,
}
impl Organize<'_> {
    fn discover(&self) -> LibraryResult<Vec<FolderEntry>> {
        let folders = self.backend.list_folders().or_raise(|| LibraryErrorKind::Discovery)?;
        let eligible: Vec<_> = folders.into_iter().filter(|folder| !folder.hidden).collect();
        tracing::info!(root = self.backend.name(), folders = eligible.len(), "Found folders");
        Ok(eligible)
    }
}

impl Iterator for Organize<'_> {
    type Item = LibraryResult<OrganizeEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            State::Start => {
                self.state = State::Discover;
                Some(Ok(OrganizeEvent::Started))
            },
            State::Discover => match self.discover() {
                Ok(folders) => {
                    // Infallible: a usize (either 32- or 64-bit) will always fit in a u64.
                    let count = u64::try_from(folders.len()).unwrap_or(0);
                    self.state = State::Folders(folders.into_iter());
                    Some(Ok(OrganizeEvent::DiscoveryComplete(count)))
                },
                Err(e) => {
                    self.state = State::Done;
                    Some(Err(e))
                },
            },
            State::Folders(folders) => match folders.next() {
                Some(folder) => Some(
                    organize_folder_inner(self.backend, self.lexicon, &mut self.registry, &folder)
                        .map(OrganizeEvent::Organized)
                        .or_raise(|| LibraryErrorKind::Organize(folder.path.clone())),
                ),
                None => {
                    self.state = State::Done;
                    Some(Ok(OrganizeEvent::Complete))
                },
            },
            State::Done => None,
        }
    }
}

/// Iterates [`OrganizeEvent`]s for every non-hidden folder directly under
/// the `backend` root, renaming or merging each one according to `lexicon`.
///
/// Folders are visited one at a time, in the order the backend lists them.
/// That order matters: the first folder for a date is renamed and every later
/// one is merged into it, so the [`Registry`] is threaded through the whole
/// run.
///
/// Individual folder failures are surfaced as `Err` items
/// ([`LibraryErrorKind::Organize`]) without terminating the iteration. Only
/// failing to list the root ([`LibraryErrorKind::Discovery`]) is fatal.
///
/// # Examples
///
/// ```
/// use datedirs_extract::models::MonthLexicon;
/// use datedirs_library::organize::{OrganizeEvent, organize};
/// use datedirs_storage::backend::LocalBackend;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = tempfile::tempdir()?;
/// std::fs::create_dir(root.path().join("IMG, 12 stycznia 2020"))?;
/// let backend = LocalBackend::new(root.path())?;
/// let lexicon = MonthLexicon::default();
/// for event in organize(&backend, &lexicon) {
///     if let Ok(OrganizeEvent::DiscoveryComplete(count)) = event {
///         assert_eq!(count, 1);
///     }
/// }
/// assert!(root.path().join("2020-01-12").is_dir());
/// # Ok(())
/// # }
/// ```
pub fn organize<'a>(backend: &'a dyn StorageBackend, lexicon: &'a MonthLexicon) -> Organize<'a> {
    Organize {
        backend,
        lexicon,
        registry: Registry::new(),
        state: State::Start,
    }
}

/// Tally of a finished (or aborted) run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub discovered: u64,
    pub renamed: u64,
    pub merged: u64,
    pub incomplete: u64,
    pub skipped: u64,
    pub failed: u64,
}
impl Summary {
    pub fn record(&mut self, event: &LibraryResult<OrganizeEvent>) {
        match event {
            Ok(OrganizeEvent::DiscoveryComplete(count)) => self.discovered = *count,
            Ok(OrganizeEvent::Organized(Action::Renamed(_))) => self.renamed += 1,
            Ok(OrganizeEvent::Organized(Action::Merged(_))) => self.merged += 1,
            Ok(OrganizeEvent::Organized(Action::MergeIncomplete(_))) => self.incomplete += 1,
            Ok(OrganizeEvent::Organized(Action::Skipped(_))) => self.skipped += 1,
            Ok(OrganizeEvent::Started | OrganizeEvent::Complete) => {},
            Err(e) if e.is_fatal() => {},
            Err(_) => self.failed += 1,
        }
    }
}
