//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The folder name doesn't have the `day month year` shape at all.
    #[display("missing {_0} in folder name")]
    MissingToken(#[error(not(source))] &'static str),
    /// The month word isn't part of the configured lexicon.
    #[display("unknown month name: {_0}")]
    UnknownMonth(#[error(not(source))] String),
    /// A token was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The token that failed to parse.
        field: &'static str,
        /// The offending token.
        value: String,
    },
    /// Tokens parsed fine, but they don't describe a day that exists.
    #[display("not a calendar date: {_0}")]
    InvalidDate(#[error(not(source))] String),
    /// A custom month table doesn't cover every month, or names a month
    /// outside of `1..=12`.
    #[display("invalid month lexicon: {_0}")]
    InvalidLexicon(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A folder name either parses or it doesn't.
        false
    }
}
