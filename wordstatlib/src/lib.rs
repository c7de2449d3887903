//! # wordstatlib
//!
//! A script-aware text statistics engine for markdown and plain-text
//! documents: character, word, and estimated page counts that stay current
//! while a document is being edited.
//!
//! ## Overview
//!
//! Naive word counters split on whitespace, which undercounts Chinese and
//! Japanese text (written without spaces) and overcounts markup that is not
//! prose. This library:
//!
//! - **Segments by script**: a run of letters from a space-delimited script
//!   (Latin, Cyrillic, Greek, Arabic, Hebrew, ...) is one word, while every
//!   CJK ideograph, Hiragana, or Katakana character is a word on its own
//! - **Filters content**: optionally skips a leading `---` frontmatter
//!   block, `%%…%%` comment blocks, and contraction endings (`it's` → `it`)
//! - **Estimates pages** from a configurable words-per-page figure
//! - **Schedules recomputes**: immediate on document switch, debounced
//!   while typing, broadcast to any number of registered sinks
//!
//! ## Example
//!
//! ```rust
//! use wordstatlib::{compute, DocumentSnapshot, StatsConfig};
//!
//! let doc = DocumentSnapshot::countable("---\ntitle: Trip\n---\nWe visited 东京 today.");
//! let stats = compute(&doc, &StatsConfig::default());
//!
//! assert_eq!(stats.words, 5);
//! assert_eq!(stats.to_string(), "Chars: 20\nWords: 5\nPages: 0.02");
//! ```

pub mod content;
pub mod counter;
pub mod discover;
pub mod document;
pub mod error;
pub mod options;
pub mod scheduler;
pub mod script;
pub mod settings;
pub mod sink;
pub mod stats;
pub mod tokenizer;

pub use content::{filter, FilteredText};
pub use counter::{compute, count_directory, count_file, count_text, CountResult};
pub use discover::{discover_files, FilterConfig};
pub use document::{DocumentKind, DocumentSnapshot};
pub use error::WordstatError;
pub use options::{StatsConfig, WordsPerPage, DEFAULT_WORDS_PER_PAGE};
pub use scheduler::{
    ConfigSource, DocumentSource, RecomputeScheduler, SchedulerState, DEFAULT_QUIET_WINDOW,
};
pub use script::{classify, CharClass};
pub use settings::{load_settings, parse_settings, SettingsResult, SettingsStore};
pub use sink::{LatestSnapshot, Sink, SinkId, SinkRegistry};
pub use stats::{FileStats, Pages, StatsSnapshot};
pub use tokenizer::{count_characters, count_words};

/// Result type for wordstatlib operations
pub type Result<T> = std::result::Result<T, WordstatError>;
