//! Core data structures for document statistics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::options::WordsPerPage;

/// Estimated page count, held as hundredths of a page.
///
/// Keeping the value as an integer makes the two-decimal rounding exact and
/// lets snapshots compare with `==`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct Pages {
    hundredths: u64,
}

impl Pages {
    /// Zero pages
    pub const ZERO: Pages = Pages { hundredths: 0 };

    /// `words / words_per_page`, rounded half-up to two decimals.
    pub fn estimate(words: u64, words_per_page: WordsPerPage) -> Self {
        let per_page = u128::from(words_per_page.get());
        let scaled = (u128::from(words) * 200 + per_page) / (2 * per_page);
        Self {
            hundredths: u64::try_from(scaled).unwrap_or(u64::MAX),
        }
    }

    /// Build from a count of hundredths of a page
    pub fn from_hundredths(hundredths: u64) -> Self {
        Self { hundredths }
    }

    /// Pages in hundredths (e.g. 109 for 1.09 pages)
    pub fn hundredths(&self) -> u64 {
        self.hundredths
    }

    /// Pages as a float
    pub fn as_f64(&self) -> f64 {
        self.hundredths as f64 / 100.0
    }
}

impl From<Pages> for f64 {
    fn from(pages: Pages) -> Self {
        pages.as_f64()
    }
}

impl From<f64> for Pages {
    fn from(value: f64) -> Self {
        // `as` saturates: negatives and NaN become 0
        Self {
            hundredths: (value * 100.0).round() as u64,
        }
    }
}

impl fmt::Display for Pages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = format!("{}.{:02}", self.hundredths / 100, self.hundredths % 100);

        // Respect width and alignment from the formatter
        if let Some(width) = f.width() {
            if f.align() == Some(fmt::Alignment::Left) {
                write!(f, "{:<width$}", s, width = width)
            } else {
                write!(f, "{:>width$}", s, width = width)
            }
        } else {
            write!(f, "{}", s)
        }
    }
}

/// Character, word and page counts for one document.
///
/// Snapshots are immutable values. Every recompute produces a new one that
/// supersedes the last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Unicode scalar values in the measured text
    pub characters: u64,
    /// Words in the measured text
    pub words: u64,
    /// Estimated pages
    pub pages: Pages,
}

impl StatsSnapshot {
    /// The snapshot reported for documents that cannot be counted.
    pub const ZERO: StatsSnapshot = StatsSnapshot {
        characters: 0,
        words: 0,
        pages: Pages::ZERO,
    };

    /// Build a snapshot, deriving pages from the word count.
    pub fn new(characters: u64, words: u64, words_per_page: WordsPerPage) -> Self {
        Self {
            characters,
            words,
            pages: Pages::estimate(words, words_per_page),
        }
    }

    /// Whether every count is zero
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Default human-readable rendering, reproduced verbatim by display surfaces.
impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chars: {}\nWords: {}\nPages: {}",
            self.characters, self.words, self.pages
        )
    }
}

/// Statistics for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Path to the file
    pub path: PathBuf,
    /// Statistics for this file
    pub stats: StatsSnapshot,
}

impl FileStats {
    /// Create new file stats
    pub fn new(path: PathBuf, stats: StatsSnapshot) -> Self {
        Self { path, stats }
    }
}
