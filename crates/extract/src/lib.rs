pub mod error;
pub mod models;
mod parse;

use exn::ResultExt;
use time::Date;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::{CanonicalDate, MonthLexicon};
pub use crate::parse::{DateTokens, strip_label, tokenize};

/// Top-level entrypoint: turns an exported folder name into its
/// [`CanonicalDate`].
///
/// - Strips an optional comma-separated label (see [`strip_label`]),
/// - resolves the month word through the given [`MonthLexicon`], and
/// - validates that the result is a real calendar date.
///
/// # Examples
///
/// ```
/// use datedirs_extract::models::MonthLexicon;
/// let lexicon = MonthLexicon::default();
/// let date = datedirs_extract::parse("IMG, 3 marca 2020", &lexicon).unwrap();
/// assert_eq!(date.to_string(), "2020-03-03");
/// ```
#[instrument(level = "debug", skip(lexicon))]
pub fn parse(name: &str, lexicon: &MonthLexicon) -> Result<CanonicalDate> {
    let tokens = tokenize(name)?;
    let day = parse::parse_day(tokens.day)?;
    let month = lexicon.month(tokens.month).ok_or_else(|| ErrorKind::UnknownMonth(tokens.month.to_string()))?;
    let year = parse::parse_year(tokens.year)?;
    let date = Date::from_calendar_date(year, month, day)
        .or_raise(|| ErrorKind::InvalidDate(format!("{} {} {}", tokens.day, tokens.month, tokens.year)))?;
    Ok(CanonicalDate::new(date))
}
