//! Stopping a run early and watching it progress.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam::channel::Sender;

use crate::candidate::Candidate;

/// Shared flag that asks a running optimizer to stop.
///
/// Optimizers poll the flag between iterations, never mid-iteration, and
/// return their best-so-far answer when they see it raised. Clones share the
/// same flag, so one can be handed to another thread (or captured by the
/// objective) while the optimizer keeps its own.
///
/// ```
/// use swarmopt::StopHandle;
///
/// let handle = StopHandle::new();
/// let remote = handle.clone();
/// assert!(!handle.is_stopped());
/// remote.stop();
/// assert!(handle.is_stopped());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// A handle that has not been raised.
    pub fn new() -> StopHandle {
        StopHandle::default()
    }

    /// Raises the flag.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether the flag has been raised.
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Lowers the flag again, so the optimizer can be rerun.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Snapshot sent after every completed iteration.
#[derive(Clone, Debug)]
pub struct Progress {
    /// Iterations completed so far in this run (1-based).
    pub iteration: usize,
    /// The answer the optimizer would return if it stopped now.
    pub best: Candidate,
}

/// Where an optimizer reports to between iterations.
#[derive(Clone, Debug, Default)]
pub(crate) struct RunControl {
    pub(crate) stop: StopHandle,
    pub(crate) progress: Option<Sender<Progress>>,
}

impl RunControl {
    /// Posts `progress` and reports whether the run should continue.
    ///
    /// If the receiver was dropped, nobody is listening any more, so we're
    /// done.
    pub(crate) fn report(&self, progress: impl FnOnce() -> Progress) -> bool {
        if let Some(sender) = self.progress.as_ref() {
            if sender.send(progress()).is_err() {
                tracing::debug!("progress receiver disconnected, stopping");
                return false;
            }
        }
        !self.stop.is_stopped()
    }
}
