//! Search lifecycle: running → draining → terminated.
//!
//! [`Control::cancel`] is the single broadcast that stops a search. It is
//! idempotent: only the first caller moves the search out of `Running`, and
//! only its reason is kept. Cancelling also closes the frontier, which wakes
//! every worker blocked on it.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::frontier::Frontier;
use crate::outcome::TerminationReason;

/// Lifecycle phase of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Draining,
    Terminated,
}

impl Phase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Running,
            1 => Self::Draining,
            _ => Self::Terminated,
        }
    }
}

/// Shared stop switch for workers, collector and monitor.
#[derive(Debug)]
pub struct Control<'f> {
    phase: AtomicU8,
    reason: Mutex<Option<TerminationReason>>,
    stopped: Condvar,
    frontier: &'f Frontier,
}

impl<'f> Control<'f> {
    #[must_use]
    pub fn new(frontier: &'f Frontier) -> Self {
        Self {
            phase: AtomicU8::new(Phase::Running as u8),
            reason: Mutex::new(None),
            stopped: Condvar::new(),
            frontier,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Stop the search for `reason`.
    ///
    /// Returns `true` for the call that actually stopped it; every later
    /// call is a no-op returning `false`. The phase changes under the reason
    /// lock, so a caller that sees `Draining` also sees the reason.
    pub fn cancel(&self, reason: TerminationReason) -> bool {
        {
            let mut recorded = self.reason.lock();
            if self
                .phase
                .compare_exchange(
                    Phase::Running as u8,
                    Phase::Draining as u8,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_err()
            {
                return false;
            }
            *recorded = Some(reason);
        }
        self.frontier.close();
        self.stopped.notify_all();
        true
    }

    /// Close the frontier after it ran dry, without recording a reason.
    ///
    /// Results may still be queued for the collector and can reach the
    /// quota; the reason is settled once the collector has drained them.
    pub fn exhaust(&self) {
        self.frontier.close();
    }

    /// Mark the search terminated once every thread has been joined.
    pub fn finish(&self) {
        self.phase.store(Phase::Terminated as u8, Ordering::Release);
    }

    /// The reason recorded by the winning [`Control::cancel`], if any.
    #[must_use]
    pub fn reason(&self) -> Option<TerminationReason> {
        *self.reason.lock()
    }

    /// Block up to `timeout` for the search to stop.
    ///
    /// Returns `true` if it has stopped.
    pub fn wait_stopped(&self, timeout: Duration) -> bool {
        let mut reason = self.reason.lock();
        if reason.is_none() {
            let _ = self.stopped.wait_for(&mut reason, timeout);
        }
        reason.is_some()
    }
}
