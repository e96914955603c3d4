//! Config Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configuration file exists but couldn't be read or deserialized.
    #[display("invalid configuration file")]
    Parse,
    /// `log_level` isn't one of trace, debug, info, warn, error, off.
    #[display("invalid log level: {_0}")]
    LogLevel(#[error(not(source))] String),
    /// The custom `[months]` table is incomplete or out of range.
    #[display("invalid month table")]
    Lexicon,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Fix the file, then run again.
        false
    }
}
