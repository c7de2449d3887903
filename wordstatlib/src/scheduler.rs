//! Recompute scheduler.
//!
//! Decides when statistics are recomputed and pushes each new snapshot to
//! the [`SinkRegistry`]:
//!
//! - **Active document changed**: recompute and broadcast right away.
//! - **Content edited**: debounce. Each edit (re)arms a single deadline one
//!   quiet window after the edit; the recompute happens once the host polls
//!   at or past that deadline. A burst of edits therefore yields exactly one
//!   recompute, run against the content as it is when the deadline passes.
//! - **Shutdown**: any pending recompute is dropped and later events are
//!   ignored.
//!
//! The scheduler never reads a clock itself. Hosts pass `Instant`s in, which
//! keeps the state machine deterministic under test, and use
//! [`RecomputeScheduler::next_deadline`] to know how long they may sleep.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::counter::compute;
use crate::document::DocumentSnapshot;
use crate::options::StatsConfig;
use crate::sink::SinkRegistry;
use crate::stats::StatsSnapshot;

/// Quiet window used when none is configured.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Where the scheduler reads the active document from.
pub trait DocumentSource {
    /// Snapshot of the document that currently has focus.
    ///
    /// Must report `is_countable == false` when no document is open or the
    /// open one is not plain text or markdown.
    fn active_document(&self) -> DocumentSnapshot;
}

impl<F> DocumentSource for F
where
    F: Fn() -> DocumentSnapshot,
{
    fn active_document(&self) -> DocumentSnapshot {
        self()
    }
}

/// Where the scheduler reads the current configuration from.
pub trait ConfigSource {
    /// The configuration in effect right now.
    fn config(&self) -> StatsConfig;
}

impl ConfigSource for StatsConfig {
    fn config(&self) -> StatsConfig {
        *self
    }
}

impl<F> ConfigSource for F
where
    F: Fn() -> StatsConfig,
{
    fn config(&self) -> StatsConfig {
        self()
    }
}

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing pending
    Idle,
    /// A debounced recompute is due at this instant
    PendingAt(Instant),
    /// Shut down; no further recomputes
    Stopped,
}

/// Drives recomputation for the active document.
pub struct RecomputeScheduler<D, C> {
    documents: D,
    config: C,
    sinks: Arc<SinkRegistry>,
    quiet_window: Duration,
    state: SchedulerState,
    recomputes: u64,
}

impl<D: DocumentSource, C: ConfigSource> RecomputeScheduler<D, C> {
    /// Create a scheduler with the default quiet window.
    pub fn new(documents: D, config: C, sinks: Arc<SinkRegistry>) -> Self {
        Self {
            documents,
            config,
            sinks,
            quiet_window: DEFAULT_QUIET_WINDOW,
            state: SchedulerState::Idle,
            recomputes: 0,
        }
    }

    /// Builder: set the debounce quiet window
    pub fn with_quiet_window(mut self, quiet_window: Duration) -> Self {
        self.quiet_window = quiet_window;
        self
    }

    /// Current state
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The debounce quiet window
    pub fn quiet_window(&self) -> Duration {
        self.quiet_window
    }

    /// Registry that receives every snapshot
    pub fn sinks(&self) -> &Arc<SinkRegistry> {
        &self.sinks
    }

    /// How many recomputes have run so far
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// When the pending recompute is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::PendingAt(deadline) => Some(deadline),
            _ => None,
        }
    }

    /// Time left until the pending recompute, saturating at zero.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// The active document changed: recompute and broadcast immediately.
    ///
    /// A pending debounced recompute is cancelled, since this one already
    /// reads the latest content. Returns `None` once shut down.
    pub fn active_document_changed(&mut self) -> Option<StatsSnapshot> {
        if self.state == SchedulerState::Stopped {
            return None;
        }
        if let SchedulerState::PendingAt(_) = self.state {
            log::trace!("focus change supersedes pending recompute");
        }
        self.state = SchedulerState::Idle;
        Some(self.recompute())
    }

    /// The active document was edited at `now`: (re)arm the debounce deadline.
    ///
    /// A recompute that was already due when this edit arrived runs first,
    /// so the host skipping a poll never swallows a settled update.
    pub fn content_edited(&mut self, now: Instant) {
        match self.state {
            SchedulerState::Stopped => return,
            SchedulerState::PendingAt(deadline) if now >= deadline => {
                log::trace!("edit arrived past the deadline, flushing first");
                self.recompute();
            }
            _ => {}
        }
        let deadline = now + self.quiet_window;
        log::trace!("edit: {:?} -> PendingAt(+{:?})", self.state, self.quiet_window);
        self.state = SchedulerState::PendingAt(deadline);
    }

    /// Run the pending recompute if its deadline has passed.
    ///
    /// Returns the broadcast snapshot when a recompute ran.
    pub fn poll(&mut self, now: Instant) -> Option<StatsSnapshot> {
        match self.state {
            SchedulerState::PendingAt(deadline) if now >= deadline => {
                self.state = SchedulerState::Idle;
                Some(self.recompute())
            }
            _ => None,
        }
    }

    /// Stop the scheduler, dropping any pending recompute.
    pub fn shutdown(&mut self) {
        if let SchedulerState::PendingAt(_) = self.state {
            log::debug!("shutdown cancelled a pending recompute");
        }
        self.state = SchedulerState::Stopped;
    }

    fn recompute(&mut self) -> StatsSnapshot {
        let doc = self.documents.active_document();
        let config = self.config.config();
        let snapshot = compute(&doc, &config);
        self.recomputes += 1;
        log::debug!(
            "recompute #{}: {} chars, {} words, {} pages",
            self.recomputes,
            snapshot.characters,
            snapshot.words,
            snapshot.pages
        );
        self.sinks.broadcast(&snapshot);
        snapshot
    }
}
