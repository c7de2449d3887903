//! Template rendering for CLI output using outstanding

use std::path::Path;

use console::Style;
use outstanding::{render_with_output, Theme};
use serde::Serialize;
use wordstatlib::{CountResult, FileStats, StatsSnapshot};

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Include template at compile time
pub const STATS_TABLE_TEMPLATE: &str = include_str!("../templates/stats_table.jinja");

const CELL_WIDTH: usize = 10;
const MIN_NAME_WIDTH: usize = 8;
const MAX_NAME_WIDTH: usize = 60;

/// How count results are laid out in term/text modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Aligned File / Chars / Words / Pages columns
    Table,
    /// The `Chars/Words/Pages` block per file
    Plain,
}

impl Layout {
    pub fn from_arg(value: &str) -> Self {
        match value {
            "plain" => Self::Plain,
            _ => Self::Table,
        }
    }
}

/// Data context for the stats table template
#[derive(Debug, Serialize)]
pub struct StatsTableContext {
    /// Pre-padded header line, empty for headerless layouts
    header: String,
    /// Separator line (dashes)
    separator: String,
    /// Pre-formatted lines
    rows: Vec<String>,
}

/// JSON row, with the path made relative to the base directory
#[derive(Debug, Serialize)]
pub struct JsonRow {
    path: String,
    #[serde(flatten)]
    stats: StatsSnapshot,
}

/// Create the theme with styles
pub fn create_theme() -> Theme {
    Theme::new().add("category", Style::new().bold())
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{}", tail)
    } else {
        name.to_string()
    }
}

/// Convert a path to a relative path from the base directory.
pub fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Rows for structured (JSON) output
pub fn json_rows(result: &CountResult, base: &Path) -> Vec<JsonRow> {
    result
        .files
        .iter()
        .map(|f| JsonRow {
            path: make_relative(&f.path, base),
            stats: f.stats,
        })
        .collect()
}

/// Template context for a count result
pub fn count_context(result: &CountResult, base: &Path, layout: Layout) -> StatsTableContext {
    match layout {
        Layout::Table => table_context(&result.files, base),
        Layout::Plain => plain_context(&result.files, base),
    }
}

/// One row per file: File, Chars, Words, Pages.
fn table_context(files: &[FileStats], base: &Path) -> StatsTableContext {
    let names: Vec<String> = files.iter().map(|f| make_relative(&f.path, base)).collect();
    let name_width = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(MIN_NAME_WIDTH, MAX_NAME_WIDTH);

    let rows = files
        .iter()
        .zip(&names)
        .map(|(file, name)| {
            format!(
                "{:<name_width$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$}",
                truncate_name(name, name_width),
                file.stats.characters,
                file.stats.words,
                file.stats.pages,
            )
        })
        .collect();

    StatsTableContext {
        header: format!(
            "{:<name_width$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$}",
            "File", "Chars", "Words", "Pages"
        ),
        separator: "-".repeat(name_width + (CELL_WIDTH + 1) * 3),
        rows,
    }
}

/// The snapshot rendering for each file, preceded by its path when there
/// is more than one. Blocks are separated by a blank line.
fn plain_context(files: &[FileStats], base: &Path) -> StatsTableContext {
    let show_names = files.len() > 1;
    let mut rows = Vec::new();

    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            rows.push(String::new());
        }
        if show_names {
            rows.push(make_relative(&file.path, base));
        }
        rows.extend(file.stats.to_string().lines().map(str::to_string));
    }

    StatsTableContext {
        header: String::new(),
        separator: String::new(),
        rows,
    }
}

/// Template context for one live snapshot, followed by a blank line
pub fn snapshot_context(snapshot: &StatsSnapshot) -> StatsTableContext {
    let mut rows: Vec<String> = snapshot.to_string().lines().map(str::to_string).collect();
    rows.push(String::new());
    StatsTableContext {
        header: String::new(),
        separator: String::new(),
        rows,
    }
}

/// Render a template context using outstanding
pub fn render_context<T: Serialize>(
    context: &T,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let theme = create_theme();
    let rendered = render_with_output(STATS_TABLE_TEMPLATE, context, &theme, output_mode)?;
    Ok(rendered)
}

/// Render one live snapshot: a JSON line in structured modes, the
/// template otherwise.
pub fn render_snapshot(
    snapshot: &StatsSnapshot,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    if output_mode.is_structured() {
        return Ok(format!("{}\n", serde_json::to_string(snapshot)?));
    }
    render_context(&snapshot_context(snapshot), output_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wordstatlib::WordsPerPage;

    fn file(path: &str, words: u64) -> FileStats {
        FileStats::new(
            PathBuf::from(path),
            StatsSnapshot::new(words * 6, words, WordsPerPage::new(275).unwrap()),
        )
    }

    fn result(files: Vec<FileStats>) -> CountResult {
        let mut result = CountResult::new();
        result.files = files;
        result
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate_name("short.md", 20), "short.md");
        assert_eq!(truncate_name("a/very/long/path/note.md", 10), "../note.md");
        assert_eq!(truncate_name("日記/とても長い名前.md", 8), "..い名前.md");
    }

    #[test]
    fn test_relative_paths() {
        let base = Path::new("/vault");
        assert_eq!(make_relative(Path::new("/vault/a/b.md"), base), "a/b.md");
        assert_eq!(make_relative(Path::new("/other/c.md"), base), "/other/c.md");
        assert_eq!(make_relative(Path::new("/vault"), base), "/vault");
    }

    #[test]
    fn test_layout_from_arg() {
        assert_eq!(Layout::from_arg("plain"), Layout::Plain);
        assert_eq!(Layout::from_arg("table"), Layout::Table);
    }

    #[test]
    fn test_table_context_has_header_and_rows() {
        let result = result(vec![file("/v/a.md", 300), file("/v/b.md", 10)]);
        let context = count_context(&result, Path::new("/v"), Layout::Table);

        assert!(context.header.starts_with("File"));
        assert!(context.header.ends_with("Pages"));
        assert_eq!(context.separator.len(), 8 + 33);
        assert_eq!(context.rows.len(), 2);
        assert!(context.rows[0].starts_with("a.md"));
        assert!(context.rows[0].ends_with("1.09"));
        assert!(context.rows[1].contains("10"));
    }

    #[test]
    fn test_plain_context_single_file() {
        let result = result(vec![file("/v/a.md", 300)]);
        let context = count_context(&result, Path::new("/v"), Layout::Plain);

        assert!(context.header.is_empty());
        assert_eq!(
            context.rows,
            vec!["Chars: 1800", "Words: 300", "Pages: 1.09"]
        );
    }

    #[test]
    fn test_plain_context_multiple_files_have_names() {
        let result = result(vec![file("/v/a.md", 1), file("/v/b.md", 2)]);
        let context = count_context(&result, Path::new("/v"), Layout::Plain);

        assert_eq!(context.rows[0], "a.md");
        assert_eq!(context.rows[1], "Chars: 6");
        assert_eq!(context.rows[4], "");
        assert_eq!(context.rows[5], "b.md");
        assert_eq!(context.rows.len(), 9);
    }

    #[test]
    fn test_json_rows() {
        let result = result(vec![file("/v/a.md", 300)]);
        let value = serde_json::to_value(json_rows(&result, Path::new("/v"))).unwrap();

        assert_eq!(value[0]["path"], "a.md");
        assert_eq!(value[0]["words"], 300);
        assert_eq!(value[0]["pages"], 1.09);
    }

    #[test]
    fn test_render_snapshot_text() {
        let snapshot = StatsSnapshot::new(13, 3, WordsPerPage::new(300).unwrap());
        let text = render_snapshot(&snapshot, OutputMode::Text).unwrap();

        assert!(text.contains("Chars: 13\nWords: 3\nPages: 0.01\n"));
    }

    #[test]
    fn test_render_snapshot_json() {
        let snapshot = StatsSnapshot::new(13, 3, WordsPerPage::new(300).unwrap());
        let line = render_snapshot(&snapshot, OutputMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["words"], 3);
        assert!(line.ends_with('\n'));
    }
}
