//! Sink registry: the display surfaces that receive snapshots.
//!
//! A sink is anything that can accept a [`StatsSnapshot`]: a status bar
//! item, a side panel, a terminal line. Sinks come and go while the
//! scheduler keeps running, so membership is tracked by [`SinkId`] handles.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::stats::StatsSnapshot;

/// A consumer of statistics snapshots.
pub trait Sink: Send + Sync {
    /// Render or store the snapshot.
    fn accept(&self, snapshot: &StatsSnapshot);
}

impl<F> Sink for F
where
    F: Fn(&StatsSnapshot) + Send + Sync,
{
    fn accept(&self, snapshot: &StatsSnapshot) {
        self(snapshot)
    }
}

/// Handle returned by [`SinkRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

#[derive(Default)]
struct Members {
    next_id: u64,
    sinks: Vec<(SinkId, Arc<dyn Sink>)>,
}

/// The set of currently registered sinks.
///
/// [`broadcast`](SinkRegistry::broadcast) delivers to the membership as it
/// was when the call started. The lock is released before any sink runs, so
/// sinks may register or unregister (themselves or others) from `accept`.
#[derive(Default)]
pub struct SinkRegistry {
    members: Mutex<Members>,
}

impl SinkRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Members> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a sink and return its handle.
    pub fn register(&self, sink: Arc<dyn Sink>) -> SinkId {
        let mut members = self.lock();
        let id = SinkId(members.next_id);
        members.next_id += 1;
        members.sinks.push((id, sink));
        log::debug!("registered sink {:?} ({} total)", id, members.sinks.len());
        id
    }

    /// Remove a sink. Returns false if it was not registered.
    pub fn unregister(&self, id: SinkId) -> bool {
        let mut members = self.lock();
        let before = members.sinks.len();
        members.sinks.retain(|(sink_id, _)| *sink_id != id);
        let removed = members.sinks.len() != before;
        if removed {
            log::debug!("unregistered sink {:?} ({} left)", id, members.sinks.len());
        }
        removed
    }

    /// Number of registered sinks
    pub fn len(&self) -> usize {
        self.lock().sinks.len()
    }

    /// Whether no sinks are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `snapshot` to every sink registered at the time of the call.
    pub fn broadcast(&self, snapshot: &StatsSnapshot) {
        let targets: Vec<Arc<dyn Sink>> = self
            .lock()
            .sinks
            .iter()
            .map(|(_, sink)| Arc::clone(sink))
            .collect();

        log::trace!("broadcasting to {} sinks", targets.len());
        for sink in targets {
            sink.accept(snapshot);
        }
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("sinks", &self.len())
            .finish()
    }
}

/// A sink that keeps only the most recent snapshot.
#[derive(Debug, Default)]
pub struct LatestSnapshot {
    latest: Mutex<Option<StatsSnapshot>>,
}

impl LatestSnapshot {
    /// Create an empty holder
    pub fn new() -> Self {
        Self::default()
    }

    /// The last snapshot received, if any
    pub fn get(&self) -> Option<StatsSnapshot> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for LatestSnapshot {
    fn accept(&self, snapshot: &StatsSnapshot) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(*snapshot);
    }
}
