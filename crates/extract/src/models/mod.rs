mod date;
mod lexicon;

pub use self::date::CanonicalDate;
pub use self::lexicon::{Locale, MonthLexicon};
