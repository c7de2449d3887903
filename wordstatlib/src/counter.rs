//! Statistics calculator and high-level counting API.
//!
//! [`compute`] is the pure core: document plus config in, snapshot out.
//! [`count_file`] and [`count_directory`] wrap it for documents on disk.

use std::path::Path;

use crate::content;
use crate::discover::{discover_files, FilterConfig};
use crate::document::DocumentSnapshot;
use crate::options::StatsConfig;
use crate::stats::{FileStats, StatsSnapshot};
use crate::tokenizer::{count_characters, count_words};
use crate::Result;

/// Compute statistics for a document.
///
/// Non-countable documents yield [`StatsSnapshot::ZERO`] without running
/// the filter pipeline. Otherwise the text is filtered according to
/// `config`, then measured.
pub fn compute(doc: &DocumentSnapshot, config: &StatsConfig) -> StatsSnapshot {
    if !doc.is_countable {
        return StatsSnapshot::ZERO;
    }
    count_text(&doc.raw_text, config)
}

/// Filter and measure raw text, treating it as countable.
pub fn count_text(text: &str, config: &StatsConfig) -> StatsSnapshot {
    let filtered = content::filter(text, config);
    StatsSnapshot::new(
        count_characters(&filtered),
        count_words(&filtered),
        config.words_per_page,
    )
}

/// Result of counting the documents under a path.
///
/// Each file is reported on its own; no cross-document total is kept.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CountResult {
    /// Per-file statistics, sorted by path
    pub files: Vec<FileStats>,
}

impl CountResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Count a single file.
///
/// # Example
///
/// ```rust,ignore
/// use wordstatlib::{count_file, StatsConfig};
///
/// let stats = count_file("notes/today.md", &StatsConfig::default())?;
/// println!("{}", stats.stats);
/// ```
pub fn count_file(path: impl AsRef<Path>, config: &StatsConfig) -> Result<FileStats> {
    let path = path.as_ref();
    let doc = DocumentSnapshot::from_path(path)?;
    Ok(FileStats::new(path.to_path_buf(), compute(&doc, config)))
}

/// Count every document under `path` that passes `filter`.
///
/// Documents that cannot be read (or are not valid UTF-8) are logged and
/// left out of the result; only a missing `path` or a failed walk is an
/// error.
pub fn count_directory(
    path: impl AsRef<Path>,
    filter: &FilterConfig,
    config: &StatsConfig,
) -> Result<CountResult> {
    let files = discover_files(path, filter)?;

    let mut result = CountResult::new();
    for file_path in files {
        match count_file(&file_path, config) {
            Ok(stats) => result.files.push(stats),
            Err(e) => log::warn!("skipping {}: {e}", file_path.display()),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::WordsPerPage;
    use std::fs;
    use tempfile::tempdir;

    fn config() -> StatsConfig {
        StatsConfig::unfiltered()
    }

    #[test]
    fn test_non_countable_is_zero() {
        let doc = DocumentSnapshot {
            raw_text: "plenty of words here".to_string(),
            is_countable: false,
        };
        assert_eq!(compute(&doc, &config()), StatsSnapshot::ZERO);
        assert_eq!(
            compute(&DocumentSnapshot::not_countable(), &config()),
            StatsSnapshot::ZERO
        );
    }

    #[test]
    fn test_empty_document() {
        let stats = compute(&DocumentSnapshot::countable(""), &config());
        assert_eq!(stats, StatsSnapshot::ZERO);
    }

    #[test]
    fn test_compute_counts() {
        let stats = compute(&DocumentSnapshot::countable("Hello 东京 world"), &config());
        assert_eq!(stats.characters, 14);
        assert_eq!(stats.words, 4);
    }

    #[test]
    fn test_contraction_matches_bare_word() {
        let cfg = config().with_ignore_contractions(true);
        assert_eq!(count_text("it's", &cfg).words, count_words("it"));
        assert_eq!(count_text("it's", &cfg).characters, 2);
    }

    #[test]
    fn test_frontmatter_excluded() {
        let cfg = config().with_ignore_frontmatter(true);
        let stats = count_text("---\na: 1\n---\nBody text", &cfg);
        assert_eq!(stats.words, 2);
        assert_eq!(stats.characters, count_characters("Body text"));
    }

    #[test]
    fn test_unterminated_frontmatter_is_zero() {
        let cfg = config().with_ignore_frontmatter(true);
        let doc = DocumentSnapshot::countable("---\nno closing");
        assert_eq!(compute(&doc, &cfg), StatsSnapshot::ZERO);
    }

    #[test]
    fn test_frontmatter_counted_when_not_ignored() {
        let stats = count_text("---\na: 1\n---\nBody text", &config());
        assert_eq!(stats.words, 4);
    }

    #[test]
    fn test_comments_excluded() {
        let cfg = config().with_ignore_comments(true);
        let stats = count_text("visible %%secret note%% text", &cfg);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_pages_from_words() {
        let cfg = config().with_words_per_page(WordsPerPage::new(275).unwrap());
        let text = vec!["word"; 300].join(" ");
        let stats = count_text(&text, &cfg);
        assert_eq!(stats.words, 300);
        assert_eq!(stats.pages.to_string(), "1.09");
    }

    #[test]
    fn test_count_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("note.md");
        fs::write(&file, "---\ntags: [a]\n---\nOne two three.").unwrap();

        let stats = count_file(&file, &StatsConfig::default()).unwrap();

        assert_eq!(stats.path, file);
        assert_eq!(stats.stats.words, 3);
    }

    #[test]
    fn test_count_directory() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "alpha beta").unwrap();
        fs::write(temp.path().join("b.txt"), "gamma").unwrap();
        fs::write(temp.path().join("c.canvas"), "delta epsilon").unwrap();

        let result = count_directory(temp.path(), &FilterConfig::new(), &config()).unwrap();

        assert_eq!(result.files.len(), 2);
        assert_eq!(result.files[0].stats.words, 2);
        assert_eq!(result.files[1].stats.words, 1);
    }

    #[test]
    fn test_count_directory_skips_unreadable_documents() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "alpha beta").unwrap();
        fs::write(temp.path().join("b.md"), [0xff, 0xfe, 0x00, 0x41]).unwrap();
        fs::write(temp.path().join("c.md"), "gamma").unwrap();

        let result = count_directory(temp.path(), &FilterConfig::new(), &config()).unwrap();

        let names: Vec<_> = result
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "c.md"]);
    }

    #[test]
    fn test_count_directory_missing_path_is_an_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");

        assert!(count_directory(&missing, &FilterConfig::new(), &config()).is_err());
    }
}
