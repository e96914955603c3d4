//! Month-name lexicons for the locales photo exports are written in.
//!
//! Exported folder names spell the month out in the language of the exporting
//! machine, so "12 stycznia 2020" and "12 January 2020" describe the same day.
//! A [`MonthLexicon`] is built once at startup and handed to the parser; it
//! never changes for the lifetime of a run.

use crate::error::{ErrorKind, Result};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use time::Month;
use unicode_normalization::UnicodeNormalization;

/// Polish month names in the genitive case, as they appear after a day number.
const POLISH: [(&str, Month); 12] = [
    ("stycznia", Month::January),
    ("lutego", Month::February),
    ("marca", Month::March),
    ("kwietnia", Month::April),
    ("maja", Month::May),
    ("czerwca", Month::June),
    ("lipca", Month::July),
    ("sierpnia", Month::August),
    ("września", Month::September),
    ("października", Month::October),
    ("listopada", Month::November),
    ("grudnia", Month::December),
];

const ENGLISH: [(&str, Month); 12] = [
    ("January", Month::January),
    ("February", Month::February),
    ("March", Month::March),
    ("April", Month::April),
    ("May", Month::May),
    ("June", Month::June),
    ("July", Month::July),
    ("August", Month::August),
    ("September", Month::September),
    ("October", Month::October),
    ("November", Month::November),
    ("December", Month::December),
];

/// Built-in locales with a known month lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Locale {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "pl"))]
    Polish,
    #[cfg_attr(feature = "serde", serde(rename = "en"))]
    English,
}
impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Polish => "pl",
            Self::English => "en",
        }
    }

    fn table(&self) -> &'static [(&'static str, Month); 12] {
        match self {
            Self::Polish => &POLISH,
            Self::English => &ENGLISH,
        }
    }
}
impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
impl FromStr for Locale {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pl" => Ok(Self::Polish),
            "en" => Ok(Self::English),
            other => exn::bail!(ErrorKind::InvalidLexicon(format!("unsupported locale `{other}`"))),
        }
    }
}

/// Immutable word → month mapping.
///
/// Lookups are exact, including case and diacritics, up to Unicode
/// normalization: words are compared in NFC, so a name stored decomposed
/// (as macOS often does) still matches.
///
/// # Examples
///
/// ```
/// use datedirs_extract::models::{Locale, MonthLexicon};
/// let lexicon = MonthLexicon::new(Locale::Polish);
/// assert_eq!(lexicon.code("maja").as_deref(), Some("05"));
/// assert_eq!(lexicon.code("May"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLexicon {
    words: HashMap<String, Month>,
}
impl MonthLexicon {
    pub fn new(locale: Locale) -> Self {
        Self {
            words: locale.table().iter().map(|(word, month)| (word.nfc().collect::<String>(), *month)).collect(),
        }
    }

    /// Build a lexicon from a user-supplied table of month numbers.
    ///
    /// Several words may point at the same month (aliases), but every month
    /// from January to December must be reachable.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidLexicon`] if a number falls outside `1..=12`, or if
    /// a month has no word mapped to it.
    pub fn custom(table: impl IntoIterator<Item = (impl Into<String>, u8)>) -> Result<Self> {
        let mut words = HashMap::new();
        for (word, number) in table {
            let word: String = word.into().nfc().collect();
            let Ok(month) = Month::try_from(number) else {
                exn::bail!(ErrorKind::InvalidLexicon(format!("`{word}` maps to month {number}")));
            };
            words.insert(word, month);
        }
        let covered: BTreeSet<u8> = words.values().map(|month| u8::from(*month)).collect();
        if let Some(missing) = (1..=12).find(|n| !covered.contains(n)) {
            exn::bail!(ErrorKind::InvalidLexicon(format!("no word for month {missing}")));
        }
        Ok(Self { words })
    }

    pub fn month(&self, word: &str) -> Option<Month> {
        self.words.get(word.nfc().collect::<String>().as_str()).copied()
    }

    /// Two-digit month code (`"01"` through `"12"`) for a month word.
    pub fn code(&self, word: &str) -> Option<String> {
        self.month(word).map(|month| format!("{:02}", u8::from(month)))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
impl Default for MonthLexicon {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
impl From<Locale> for MonthLexicon {
    fn from(locale: Locale) -> Self {
        Self::new(locale)
    }
}
