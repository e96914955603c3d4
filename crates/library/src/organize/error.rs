//! Error types for the [`organize`](super) module.
//!
//! Uses [`exn`] for automatic location tracking and error tree construction.

use derive_more::{Display, Error};

/// An organize error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for organize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a single folder's failure.
///
/// Each variant identifies the step that failed, allowing callers to inspect
/// the error tree without matching on opaque strings. The underlying
/// [`datedirs_extract`] or [`datedirs_storage`] error is kept as a child.
///
/// A failed folder is left where it is: unrenamed, or partially merged when
/// [`ErrorKind::Merge`] fails part-way through moving files.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The folder name isn't a recognisable `day month year` phrase.
    #[display("folder name is not a date")]
    Parse,
    /// Renaming the folder to its canonical name failed; the canonical name
    /// was not registered.
    #[display("rename failed")]
    Rename,
    /// Listing or moving the folder's files into the canonical folder failed.
    #[display("merge failed")]
    Merge,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Retrying can't fix a name; storage failures are left to a re-run.
        false
    }
}
