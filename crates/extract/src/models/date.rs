use std::fmt;
use std::path::PathBuf;
use time::Date;

/// A folder's canonical `YYYY-MM-DD` date.
///
/// Wraps a validated [`Date`], so a `CanonicalDate` always names a day that
/// exists. Ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(Date);
impl CanonicalDate {
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// Path of the canonical folder, relative to the root being organized.
    pub fn folder(&self) -> PathBuf {
        PathBuf::from(self.to_string())
    }
}
impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.0.year(), u8::from(self.0.month()), self.0.day())
    }
}
impl From<Date> for CanonicalDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}
