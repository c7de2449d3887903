//! Input options for word counting.
//!
//! This module contains the configuration types that control what text the
//! statistics calculator measures and how pages are estimated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WordstatError;

/// Words per page used when nothing else is configured.
pub const DEFAULT_WORDS_PER_PAGE: u32 = 300;

/// A positive number of words per estimated page.
///
/// Zero, negative, and non-numeric values cannot be represented, so a
/// `StatsConfig` can always divide by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct WordsPerPage(u32);

impl WordsPerPage {
    /// Create from a raw count, rejecting zero.
    pub fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// The raw count (always > 0)
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for WordsPerPage {
    fn default() -> Self {
        Self(DEFAULT_WORDS_PER_PAGE)
    }
}

impl fmt::Display for WordsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for WordsPerPage {
    type Error = WordstatError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| WordstatError::InvalidWordsPerPage {
                value: value.to_string(),
            })
    }
}

impl From<WordsPerPage> for u32 {
    fn from(value: WordsPerPage) -> Self {
        value.0
    }
}

impl FromStr for WordsPerPage {
    type Err = WordstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WordstatError::InvalidWordsPerPage {
            value: s.to_string(),
        };
        let parsed: i64 = s.trim().parse().map_err(|_| invalid())?;
        Self::try_from(parsed).map_err(|_| invalid())
    }
}

/// Options controlling which parts of a document are measured.
///
/// A config is immutable for the duration of one computation; hosts replace
/// it wholesale when the user changes a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Strip `'s`, `'d`, `'ll`, `'ve`, `'re`, `'m` word endings before counting
    pub ignore_contractions: bool,
    /// Skip `%%…%%` comment blocks
    pub ignore_comments: bool,
    /// Skip a leading `---` frontmatter block
    pub ignore_frontmatter: bool,
    /// Words per estimated page
    pub words_per_page: WordsPerPage,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            ignore_contractions: false,
            ignore_comments: true,
            ignore_frontmatter: true,
            words_per_page: WordsPerPage::default(),
        }
    }
}

impl StatsConfig {
    /// Create the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// A config with every filtering pass disabled
    pub fn unfiltered() -> Self {
        Self {
            ignore_contractions: false,
            ignore_comments: false,
            ignore_frontmatter: false,
            words_per_page: WordsPerPage::default(),
        }
    }

    /// Builder: set contraction normalization
    pub fn with_ignore_contractions(mut self, ignore: bool) -> Self {
        self.ignore_contractions = ignore;
        self
    }

    /// Builder: set comment-block removal
    pub fn with_ignore_comments(mut self, ignore: bool) -> Self {
        self.ignore_comments = ignore;
        self
    }

    /// Builder: set frontmatter removal
    pub fn with_ignore_frontmatter(mut self, ignore: bool) -> Self {
        self.ignore_frontmatter = ignore;
        self
    }

    /// Builder: set words per page
    pub fn with_words_per_page(mut self, words_per_page: WordsPerPage) -> Self {
        self.words_per_page = words_per_page;
        self
    }

    /// Whether any filtering pass is enabled
    pub fn filters_anything(&self) -> bool {
        self.ignore_contractions || self.ignore_comments || self.ignore_frontmatter
    }
}
