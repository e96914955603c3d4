//! Layered configuration for `datedirs`.
//!
//! Built-in defaults are merged with optional `config.toml`, `config.yaml` and
//! `config.json` files (in that order, later files win) from the platform
//! configuration directory, e.g. `~/.config/datedirs/` on Linux. There is
//! nothing to configure per run; the root folder is the only argument.
//!
//! ```toml
//! locale = "pl"
//! log_level = "info"
//!
//! # Optional; replaces the locale's month names entirely.
//! [months]
//! styczen = 1
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use datedirs_extract::models::{Locale, MonthLexicon};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

const APPLICATION: &str = "datedirs";
const FILES: [&str; 3] = ["config.toml", "config.yaml", "config.json"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Built-in month lexicon to parse folder names with.
    pub locale: Locale,
    pub log_level: String,
    /// Custom month table (word → month number), overriding `locale`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<BTreeMap<String, u8>>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            log_level: "info".to_string(),
            months: None,
        }
    }
}

impl Config {
    /// Load from the platform configuration directory. Falls back to the
    /// defaults when no such directory can be determined (no home directory).
    pub fn load() -> Result<Self> {
        match config_dir() {
            Some(dir) => Self::load_from(dir),
            None => Self::from_figment(Self::defaults()),
        }
    }

    /// Load from the configuration files in `dir`. Missing files are skipped.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let figment = Self::defaults()
            .merge(Toml::file(dir.join(FILES[0])))
            .merge(Yaml::file(dir.join(FILES[1])))
            .merge(Json::file(dir.join(FILES[2])));
        Self::from_figment(figment)
    }

    /// Extract and validate, so a bad log level or month table is reported
    /// before any folder is touched.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Parse)?;
        config.level_filter()?;
        config.lexicon()?;
        Ok(config)
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level.parse::<LevelFilter>().or_raise(|| ErrorKind::LogLevel(self.log_level.clone()))
    }

    /// The month lexicon for this configuration: the custom table if one is
    /// given, otherwise the built-in one for [`locale`](Self::locale).
    pub fn lexicon(&self) -> Result<MonthLexicon> {
        match &self.months {
            Some(table) => {
                MonthLexicon::custom(table.iter().map(|(word, month)| (word.clone(), *month)))
                    .or_raise(|| ErrorKind::Lexicon)
            },
            None => Ok(MonthLexicon::new(self.locale)),
        }
    }
}

/// Platform configuration directory for `datedirs`, if a home directory can
/// be found.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APPLICATION).map(|dirs| dirs.config_dir().to_path_buf())
}
