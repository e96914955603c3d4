//! Tokenizing exported folder names.
//!
//! Exported names look like `12 stycznia 2020`, optionally preceded by a
//! comma-separated label: `IMG, 12 stycznia 2020`. Only the segment after the
//! first comma is kept, and only the first three space-separated tokens of it
//! matter.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;

/// Borrowed `day month year` tokens of a folder name. Nothing is validated
/// yet; see [`parse`](crate::parse()) for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTokens<'a> {
    pub day: &'a str,
    pub month: &'a str,
    pub year: &'a str,
}

/// Drops a comma-separated label from the front of a folder name.
///
/// With a comma present, the *second* comma-separated segment is returned
/// trimmed, and everything before the first comma and after the second is
/// discarded. Without a comma, the name is returned untouched.
///
/// # Examples
///
/// ```
/// use datedirs_extract::strip_label;
/// assert_eq!(strip_label("IMG, 3 marca 2020"), "3 marca 2020");
/// assert_eq!(strip_label("a, 3 marca 2020, b"), "3 marca 2020");
/// assert_eq!(strip_label("3 marca 2020"), "3 marca 2020");
/// ```
pub fn strip_label(name: &str) -> &str {
    name.split(',').nth(1).map_or(name, str::trim)
}

/// Splits a folder name into its [`DateTokens`].
///
/// Separators are single spaces, so repeated spaces produce empty tokens
/// (which then fail validation instead of silently shifting the tokens).
/// Tokens after the year are ignored.
///
/// # Errors
/// [`ErrorKind::MissingToken`] when fewer than three tokens remain after the
/// label has been stripped.
pub fn tokenize(name: &str) -> Result<DateTokens<'_>> {
    let mut tokens = strip_label(name).split(' ');
    let day = tokens.next().ok_or(ErrorKind::MissingToken("day"))?;
    let month = tokens.next().ok_or(ErrorKind::MissingToken("month"))?;
    let year = tokens.next().ok_or(ErrorKind::MissingToken("year"))?;
    Ok(DateTokens { day, month, year })
}

pub(crate) fn parse_day(token: &str) -> Result<u8> {
    if !(1..=2).contains(&token.len()) || !token.bytes().all(|b| b.is_ascii_digit()) {
        exn::bail!(ErrorKind::ParseError { field: "day", value: token.to_string() });
    }
    token.parse::<u8>().or_raise(|| ErrorKind::ParseError { field: "day", value: token.to_string() })
}

pub(crate) fn parse_year(token: &str) -> Result<i32> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        exn::bail!(ErrorKind::ParseError { field: "year", value: token.to_string() });
    }
    token.parse::<i32>().or_raise(|| ErrorKind::ParseError { field: "year", value: token.to_string() })
}
