//! Settings: the configuration boundary.
//!
//! Settings come from an optional TOML file:
//!
//! ```toml
//! [stats]
//! ignore_contractions = true
//! ignore_comments = true
//! ignore_frontmatter = true
//! words_per_page = 275
//! ```
//!
//! Every value is validated here, before it can reach a computation. A bad
//! `words_per_page` never fails a count: the previous valid value stays in
//! effect and a warning is reported instead.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;

use crate::error::WordstatError;
use crate::options::{StatsConfig, WordsPerPage};
use crate::scheduler::ConfigSource;
use crate::Result;

/// Raw `[stats]` table. Fields are optional so a partial file only
/// overrides what it names, and `words_per_page` is kept as a TOML value
/// so a bad entry can be rejected on its own.
#[derive(Debug, Default, Deserialize)]
struct RawStats {
    ignore_contractions: Option<bool>,
    ignore_comments: Option<bool>,
    ignore_frontmatter: Option<bool>,
    words_per_page: Option<toml::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    stats: RawStats,
}

/// Result of loading settings
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsResult {
    /// The effective configuration
    pub config: StatsConfig,
    /// Problems that were recovered from, for the host to surface
    pub warnings: Vec<String>,
}

/// Parse settings from TOML text, applying them over `base`.
///
/// Malformed TOML is an error; an invalid `words_per_page` is reported as a
/// warning and `base`'s value is kept.
pub fn parse_settings(
    contents: &str,
    base: StatsConfig,
) -> std::result::Result<SettingsResult, String> {
    let raw: RawSettings = toml::from_str(contents).map_err(|e| e.to_string())?;
    let mut config = base;
    let mut warnings = Vec::new();

    if let Some(v) = raw.stats.ignore_contractions {
        config.ignore_contractions = v;
    }
    if let Some(v) = raw.stats.ignore_comments {
        config.ignore_comments = v;
    }
    if let Some(v) = raw.stats.ignore_frontmatter {
        config.ignore_frontmatter = v;
    }
    if let Some(value) = raw.stats.words_per_page {
        match words_per_page_from_toml(&value) {
            Ok(words_per_page) => config.words_per_page = words_per_page,
            Err(e) => {
                log::warn!("{e}; keeping {}", config.words_per_page);
                warnings.push(e.to_string());
            }
        }
    }

    Ok(SettingsResult { config, warnings })
}

fn words_per_page_from_toml(value: &toml::Value) -> Result<WordsPerPage> {
    match value {
        toml::Value::Integer(n) => WordsPerPage::try_from(*n),
        toml::Value::String(s) => s.parse(),
        other => Err(WordstatError::InvalidWordsPerPage {
            value: other.to_string(),
        }),
    }
}

/// Load settings from a TOML file.
///
/// A missing file yields the defaults silently. An unreadable or malformed
/// file yields the defaults plus a warning.
pub fn load_settings(path: impl AsRef<Path>) -> SettingsResult {
    let path = path.as_ref();

    if !path.exists() {
        log::debug!("settings file {} does not exist, using defaults", path.display());
        return SettingsResult {
            config: StatsConfig::default(),
            warnings: Vec::new(),
        };
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            let err = WordstatError::FileRead {
                path: path.to_path_buf(),
                source: e,
            };
            log::warn!("{err}");
            return SettingsResult {
                config: StatsConfig::default(),
                warnings: vec![err.to_string()],
            };
        }
    };

    match parse_settings(&contents, StatsConfig::default()) {
        Ok(result) => result,
        Err(message) => {
            let err = WordstatError::ConfigParse {
                path: path.to_path_buf(),
                message,
            };
            log::warn!("{err}");
            SettingsResult {
                config: StatsConfig::default(),
                warnings: vec![err.to_string()],
            }
        }
    }
}

/// Shared, validated configuration.
///
/// Clones share the same value, so a host can hand one clone to a
/// [`RecomputeScheduler`](crate::RecomputeScheduler) and keep another for
/// applying user changes.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    current: Arc<Mutex<StatsConfig>>,
}

impl SettingsStore {
    /// Create a store holding `config`
    pub fn new(config: StatsConfig) -> Self {
        Self {
            current: Arc::new(Mutex::new(config)),
        }
    }

    /// The configuration in effect
    pub fn current(&self) -> StatsConfig {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, apply: impl FnOnce(&mut StatsConfig)) {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut *guard);
    }

    /// Set words per page from user input.
    ///
    /// Non-numeric and non-positive input is rejected and the previous
    /// value is retained.
    pub fn set_words_per_page(&self, input: &str) -> Result<WordsPerPage> {
        match input.parse::<WordsPerPage>() {
            Ok(words_per_page) => {
                self.update(|c| c.words_per_page = words_per_page);
                Ok(words_per_page)
            }
            Err(e) => {
                log::warn!("{e}; keeping {}", self.current().words_per_page);
                Err(e)
            }
        }
    }

    /// Toggle contraction normalization
    pub fn set_ignore_contractions(&self, ignore: bool) {
        self.update(|c| c.ignore_contractions = ignore);
    }

    /// Toggle comment-block removal
    pub fn set_ignore_comments(&self, ignore: bool) {
        self.update(|c| c.ignore_comments = ignore);
    }

    /// Toggle frontmatter removal
    pub fn set_ignore_frontmatter(&self, ignore: bool) {
        self.update(|c| c.ignore_frontmatter = ignore);
    }
}

impl ConfigSource for SettingsStore {
    fn config(&self) -> StatsConfig {
        self.current()
    }
}
