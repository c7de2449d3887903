//! `wordstat watch`: live statistics for one file.
//!
//! The file is polled for changes to its modification time or length. Each
//! change is fed to the recompute scheduler as an edit, so a burst of saves
//! produces a single update once the file has been quiet for the debounce
//! window.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use wordstatlib::{
    DocumentSnapshot, DocumentSource, RecomputeScheduler, SettingsStore, SinkRegistry,
};

/// The watched file, re-read on every recompute.
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileDocument {
    fn active_document(&self) -> DocumentSnapshot {
        DocumentSnapshot::from_path(&self.path).unwrap_or_else(|e| {
            log::warn!("{e}");
            DocumentSnapshot::not_countable()
        })
    }
}

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Debounce quiet window
    pub quiet_window: Duration,
    /// How often the file is checked for changes
    pub poll_interval: Duration,
    /// Stop after this many updates (the initial one included)
    pub max_updates: Option<u64>,
}

/// What a change check compares: modification time and length
type Fingerprint = Option<(SystemTime, u64)>;

fn fingerprint(path: &Path) -> Fingerprint {
    let meta = fs::metadata(path).ok()?;
    Some((meta.modified().ok()?, meta.len()))
}

/// Broadcast statistics for `path` to `sinks` now and after every settled
/// change.
pub fn run(
    path: &Path,
    settings: SettingsStore,
    sinks: Arc<SinkRegistry>,
    options: &WatchOptions,
) {
    let mut scheduler = RecomputeScheduler::new(FileDocument::new(path), settings, sinks)
        .with_quiet_window(options.quiet_window);

    log::info!(
        "watching {} (debounce {:?}, poll {:?})",
        path.display(),
        options.quiet_window,
        options.poll_interval
    );

    let mut last_seen = fingerprint(path);
    scheduler.active_document_changed();

    while options
        .max_updates
        .map_or(true, |max| scheduler.recompute_count() < max)
    {
        let now = Instant::now();
        let nap = scheduler
            .time_until_due(now)
            .map_or(options.poll_interval, |due| due.min(options.poll_interval));
        thread::sleep(nap);

        let now = Instant::now();
        scheduler.poll(now);

        let current = fingerprint(path);
        if current != last_seen {
            last_seen = current;
            scheduler.content_edited(now);
        }
    }

    scheduler.shutdown();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;
    use wordstatlib::StatsSnapshot;

    fn options(max_updates: u64) -> WatchOptions {
        WatchOptions {
            quiet_window: Duration::from_millis(400),
            poll_interval: Duration::from_millis(5),
            max_updates: Some(max_updates),
        }
    }

    fn recording_sinks() -> (Arc<SinkRegistry>, Arc<Mutex<Vec<StatsSnapshot>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sinks = Arc::new(SinkRegistry::new());
        let record = Arc::clone(&seen);
        sinks.register(Arc::new(move |snapshot: &StatsSnapshot| {
            record.lock().unwrap().push(*snapshot);
        }));
        (sinks, seen)
    }

    #[test]
    fn test_file_document_reads_current_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.md");
        fs::write(&path, "first").unwrap();
        let doc = FileDocument::new(&path);

        assert_eq!(doc.active_document().raw_text, "first");
        fs::write(&path, "second version").unwrap();
        assert_eq!(doc.active_document().raw_text, "second version");
    }

    #[test]
    fn test_missing_file_is_not_countable() {
        let dir = tempdir().unwrap();
        let doc = FileDocument::new(dir.path().join("gone.md"));

        assert!(!doc.active_document().is_countable);
    }

    #[test]
    fn test_initial_update_reflects_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.md");
        fs::write(&path, "one two").unwrap();
        let (sinks, seen) = recording_sinks();

        run(&path, SettingsStore::default(), sinks, &options(1));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].words, 2);
    }

    #[test]
    fn test_burst_of_writes_yields_one_update_with_latest_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("draft.md");
        fs::write(&path, "one").unwrap();
        let (sinks, seen) = recording_sinks();

        let writer_path = path.clone();
        let writer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            for text in ["one two", "one two three", "one two three four five"] {
                fs::write(&writer_path, text).unwrap();
                thread::sleep(Duration::from_millis(20));
            }
        });

        run(&path, SettingsStore::default(), sinks, &options(2));
        writer.join().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].words, 1);
        assert_eq!(seen[1].words, 5);
    }
}
