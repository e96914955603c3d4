//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The root folder couldn't be listed. Nothing was organized.
    #[display("cannot list directory")]
    Discovery,
    /// A single folder couldn't be organized; the rest of the run carries on.
    #[display("could not organize folder {}", _0.display())]
    Organize(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if the whole run has to stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Discovery)
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
