//! # wordstat
//!
//! A CLI for character, word, and page counts of markdown and plain-text
//! documents.
//!
//! ## Overview
//!
//! wordstat is built on top of wordstatlib. It counts words the way a writer
//! expects: CJK characters count one each, frontmatter and `%%comments%%`
//! are skipped, and pages are estimated from a words-per-page figure.
//!
//! ## Usage
//!
//! ```bash
//! # Count every .md/.txt file under the current directory
//! wordstat .
//!
//! # Count one note, printing the plain Chars/Words/Pages block
//! wordstat notes/today.md --layout plain
//!
//! # Machine-readable rows
//! wordstat vault --output json
//!
//! # Skip drafts, count contractions as bare words
//! wordstat vault --exclude "**/drafts/**" --ignore-contractions
//!
//! # Live counts while editing
//! wordstat watch notes/today.md
//! ```
//!
//! Settings are read from `--config <FILE>`, or `wordstat.toml` in the
//! current directory when present; command-line flags override them.

mod logging;
mod render;
mod watch;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};
use wordstatlib::{
    count_directory, load_settings, CountResult, FilterConfig, SettingsStore, SinkRegistry,
    StatsSnapshot,
};

use render::{Layout, OutputMode, STATS_TABLE_TEMPLATE};
use watch::WatchOptions;

/// Settings file picked up from the working directory
const DEFAULT_SETTINGS_FILE: &str = "wordstat.toml";

/// Arguments shared by `count` and `watch`
fn config_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .long("config")
            .value_parser(value_parser!(PathBuf))
            .help("Settings file (TOML)"),
        Arg::new("ignore-contractions")
            .long("ignore-contractions")
            .action(ArgAction::SetTrue)
            .help("Drop 's, 'd, 'll, 've, 're, 'm word endings before counting"),
        Arg::new("keep-comments")
            .long("keep-comments")
            .action(ArgAction::SetTrue)
            .help("Count text inside %%comment%% blocks"),
        Arg::new("keep-frontmatter")
            .long("keep-frontmatter")
            .action(ArgAction::SetTrue)
            .help("Count the leading --- frontmatter block"),
        Arg::new("words-per-page")
            .short('w')
            .long("words-per-page")
            .help("Words per estimated page (positive integer)"),
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
            .help("Increase log verbosity (-v, -vv, -vvv)"),
    ]
}

/// Arguments of the count command
fn count_args() -> Vec<Arg> {
    let mut args = vec![
        Arg::new("paths")
            .help("Files or directories to count (defaults to current directory)")
            .num_args(1..)
            .default_value("."),
        Arg::new("include")
            .short('i')
            .long("include")
            .action(ArgAction::Append)
            .help("Include files matching glob pattern"),
        Arg::new("exclude")
            .short('e')
            .long("exclude")
            .action(ArgAction::Append)
            .help("Exclude files matching glob pattern"),
        Arg::new("layout")
            .short('l')
            .long("layout")
            .value_parser(["table", "plain"])
            .default_value("table")
            .help("Layout for term/text output: one table, or a block per file"),
    ];
    args.extend(config_args());
    args
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("wordstat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Script-aware word, character and page counter for markdown and text")
        .args(count_args())
        .args_conflicts_with_subcommands(true)
        .subcommand(
            Command::new("count")
                .about("Count documents (default command)")
                .args(count_args()),
        )
        .subcommand(
            Command::new("watch")
                .about("Print live statistics for a file as it changes")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("File to watch"),
                )
                .arg(
                    Arg::new("debounce-ms")
                        .long("debounce-ms")
                        .value_parser(value_parser!(u64))
                        .default_value("500")
                        .help("Quiet period after the last change before recounting"),
                )
                .arg(
                    Arg::new("poll-ms")
                        .long("poll-ms")
                        .value_parser(value_parser!(u64))
                        .default_value("100")
                        .help("How often to check the file for changes"),
                )
                .arg(
                    Arg::new("max-updates")
                        .long("max-updates")
                        .value_parser(value_parser!(u64))
                        .help("Exit after this many updates"),
                )
                .args(config_args()),
        )
}

/// Resolve the effective configuration: settings file, then flags.
fn build_settings(matches: &ArgMatches) -> SettingsStore {
    let path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

    // Problems with the settings file are logged as warnings by the loader
    let store = SettingsStore::new(load_settings(&path).config);
    if matches.get_flag("ignore-contractions") {
        store.set_ignore_contractions(true);
    }
    if matches.get_flag("keep-comments") {
        store.set_ignore_comments(false);
    }
    if matches.get_flag("keep-frontmatter") {
        store.set_ignore_frontmatter(false);
    }
    if let Some(raw) = matches.get_one::<String>("words-per-page") {
        // A rejected value is logged and the previous one stays in effect
        let _ = store.set_words_per_page(raw);
    }

    store
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Base directory for relative paths in the output
fn base_dir(paths: &[&str]) -> PathBuf {
    match paths {
        [single] if Path::new(single).is_dir() => PathBuf::from(single),
        _ => PathBuf::from("."),
    }
}

/// Handler for count command
fn count_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    logging::initialize(matches.get_count("verbose"));

    let paths: Vec<&str> = matches
        .get_many::<String>("paths")
        .map(|v| v.map(|s| s.as_str()).collect())
        .unwrap_or_else(|| vec!["."]);
    let filter = build_filter(matches)?;
    let config = build_settings(matches).current();

    let mut result = CountResult::new();
    for path in &paths {
        result
            .files
            .extend(count_directory(path, &filter, &config)?.files);
    }

    let base = base_dir(&paths);

    // For JSON mode, return one row per file
    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(render::json_rows(
            &result, &base,
        ))?));
    }

    let layout = Layout::from_arg(
        matches
            .get_one::<String>("layout")
            .map(|s| s.as_str())
            .unwrap_or("table"),
    );
    let context = render::count_context(&result, &base, layout);
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Handler for watch command
fn watch_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    logging::initialize(matches.get_count("verbose"));

    let file = matches
        .get_one::<PathBuf>("file")
        .ok_or_else(|| anyhow::anyhow!("missing file argument"))?;
    if !file.is_file() {
        return Err(anyhow::anyhow!("not a file: {}", file.display()).into());
    }

    let settings = build_settings(matches);
    let options = WatchOptions {
        quiet_window: Duration::from_millis(
            matches.get_one::<u64>("debounce-ms").copied().unwrap_or(500),
        ),
        poll_interval: Duration::from_millis(
            matches.get_one::<u64>("poll-ms").copied().unwrap_or(100),
        ),
        max_updates: matches.get_one::<u64>("max-updates").copied(),
    };

    let output_mode = ctx.output_mode;
    let sinks = Arc::new(SinkRegistry::new());
    sinks.register(Arc::new(move |snapshot: &StatsSnapshot| {
        match render::render_snapshot(snapshot, output_mode) {
            Ok(output) => {
                print!("{output}");
                let _ = io::stdout().flush();
            }
            Err(e) => log::error!("failed to render snapshot: {e}"),
        }
    }));

    watch::run(file, settings, sinks, &options);
    Ok(Output::Silent)
}

/// Output mode chosen with outstanding's `--output` flag
fn output_mode_from(matches: &ArgMatches) -> OutputMode {
    matches
        .get_one::<String>("_output_mode")
        .map(|s| match s.as_str() {
            "json" => OutputMode::Json,
            "text" => OutputMode::Text,
            "term-debug" => OutputMode::TermDebug,
            "term" => OutputMode::Term,
            _ => OutputMode::Auto,
        })
        .unwrap_or(OutputMode::Auto)
}

fn main() -> ExitCode {
    let cmd = build_command();

    // Build the outstanding app with command handlers and run
    let result = App::builder()
        .theme(render::create_theme())
        .command("count", count_handler, STATS_TABLE_TEMPLATE)
        .command("watch", watch_handler, STATS_TABLE_TEMPLATE)
        .run_to_string(cmd, std::env::args());

    match result {
        RunResult::Handled(output) => {
            if output.starts_with("Error:") {
                eprintln!("{}", output.trim_end());
                return ExitCode::FAILURE;
            }
            print!("{}", output);
            ExitCode::SUCCESS
        }
        RunResult::Binary(_, _) => ExitCode::SUCCESS,
        RunResult::NoMatch(matches) => {
            // Root command (no subcommand) counts
            let output_mode = output_mode_from(&matches);
            let ctx = CommandContext {
                output_mode,
                command_path: vec![],
            };

            let rendered = match count_handler(&matches, &ctx) {
                Ok(Output::Render(value)) if output_mode.is_structured() => {
                    serde_json::to_string_pretty(&value)
                        .map(|json| json + "\n")
                        .map_err(|e| e.to_string())
                }
                Ok(Output::Render(value)) => {
                    render::render_context(&value, output_mode).map_err(|e| e.to_string())
                }
                Ok(_) => Ok(String::new()),
                Err(e) => Err(e.to_string()),
            };

            match rendered {
                Ok(output) => {
                    print!("{}", output);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_default_command_counts_current_directory() {
        let matches = build_command().get_matches_from(["wordstat"]);
        let paths: Vec<&String> = matches.get_many::<String>("paths").unwrap().collect();
        assert_eq!(paths, vec!["."]);
    }

    #[test]
    fn test_flags_override_settings() {
        let matches = build_command().get_matches_from([
            "wordstat",
            "--config",
            "/nonexistent/wordstat.toml",
            "--ignore-contractions",
            "--keep-comments",
            "-w",
            "275",
        ]);
        let config = build_settings(&matches).current();

        assert!(config.ignore_contractions);
        assert!(!config.ignore_comments);
        assert!(config.ignore_frontmatter);
        assert_eq!(config.words_per_page.get(), 275);
    }

    #[test]
    fn test_invalid_words_per_page_keeps_default() {
        let matches = build_command().get_matches_from([
            "wordstat",
            "--config",
            "/nonexistent/wordstat.toml",
            "--words-per-page",
            "zero",
        ]);
        let config = build_settings(&matches).current();

        assert_eq!(config.words_per_page.get(), wordstatlib::DEFAULT_WORDS_PER_PAGE);
    }

    #[test]
    fn test_watch_subcommand_parses() {
        let matches = build_command().get_matches_from([
            "wordstat",
            "watch",
            "note.md",
            "--debounce-ms",
            "250",
        ]);
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "watch");
        assert_eq!(sub.get_one::<u64>("debounce-ms"), Some(&250));
        assert_eq!(sub.get_one::<u64>("poll-ms"), Some(&100));
    }

    #[test]
    fn test_layout_defaults_to_table() {
        let matches = build_command().get_matches_from(["wordstat", "notes"]);
        assert_eq!(
            matches.get_one::<String>("layout").map(|s| s.as_str()),
            Some("table")
        );

        let matches = build_command().get_matches_from(["wordstat", "count", "-l", "plain"]);
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<String>("layout").map(|s| s.as_str()), Some("plain"));
    }
}
