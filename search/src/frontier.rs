//! Bounded shared frontier with active-worker accounting.
//!
//! One mutex guards the queue, the active-worker counter and the closed
//! flag, so "frontier empty and nobody working" is observed atomically with
//! the pop that would otherwise have found work. Two condition variables
//! carry the wakeups: `not_empty` (new work, or the search went idle) and
//! `not_full` (space freed by a pop, or the frontier was closed).
//!
//! Both traversal orders pop from the front. Breadth-first pushes at the
//! back (FIFO); depth-first pushes at the front (LIFO).

use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::policy::{BackoffPolicy, Traversal};
use crate::state::SearchState;

/// Result of [`Frontier::pop`].
#[derive(Debug)]
pub enum Pop<'f> {
    /// A state to expand. The worker counts as active until the
    /// [`ActiveStep`] is dropped.
    Ready(SearchState, ActiveStep<'f>),
    /// The frontier is empty and no worker holds a state: no more work can
    /// ever arrive.
    Exhausted,
    /// The frontier was closed (search draining).
    Closed,
}

/// Result of [`Frontier::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    /// The frontier stayed full for every attempt; the state was discarded.
    /// Carries the running total of dropped states.
    Dropped { total: u64 },
    /// The frontier was closed; the state was discarded.
    Closed,
}

/// Marks a worker as holding a popped state.
///
/// Dropping it ends the step. When the last active step ends with an empty
/// queue, every idle waiter is woken so one of them can report exhaustion.
#[derive(Debug)]
#[must_use = "the worker stops counting as active as soon as this is dropped"]
pub struct ActiveStep<'f> {
    frontier: &'f Frontier,
}

impl Drop for ActiveStep<'_> {
    fn drop(&mut self) {
        self.frontier.finish_step();
    }
}

#[derive(Debug, Default)]
struct Inner {
    states: VecDeque<SearchState>,
    active: usize,
    closed: bool,
    high_water: u64,
    pushed: u64,
    dropped: u64,
}

/// Shared, capacity-bounded collection of pending search states.
#[derive(Debug)]
pub struct Frontier {
    inner: Mutex<Inner>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
    traversal: Traversal,
}

impl Frontier {
    #[must_use]
    pub fn new(traversal: Traversal, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
            traversal,
        }
    }

    /// Insert the initial states, ignoring capacity.
    ///
    /// The seed set is bounded by the target's recipe count, so it may
    /// exceed a deliberately tiny capacity without dropping anything.
    pub fn seed(&self, states: impl IntoIterator<Item = SearchState>) {
        let mut inner = self.inner.lock();
        for state in states {
            self.insert(&mut inner, state);
        }
        drop(inner);
        self.not_empty.notify_all();
    }

    /// Take the next state, waiting up to `idle_wait` at a time while other
    /// workers may still produce work.
    pub fn pop(&self, idle_wait: Duration) -> Pop<'_> {
        let mut inner = self.inner.lock();
        loop {
            if inner.closed {
                return Pop::Closed;
            }
            if let Some(state) = inner.states.pop_front() {
                inner.active += 1;
                drop(inner);
                self.not_full.notify_one();
                return Pop::Ready(state, ActiveStep { frontier: self });
            }
            if inner.active == 0 {
                return Pop::Exhausted;
            }
            let _ = self.not_empty.wait_for(&mut inner, idle_wait);
        }
    }

    /// Push a state, backing off while the frontier is full.
    ///
    /// The size check and the insert happen under one lock. A full frontier
    /// is retried `backoff.attempts` times in total, waiting on `not_full`
    /// with exponentially growing timeouts; if it is still full the state is
    /// dropped and counted. Results already collected are never touched.
    pub fn push(&self, state: SearchState, backoff: &BackoffPolicy) -> PushOutcome {
        let mut delay = backoff.initial;
        let mut inner = self.inner.lock();
        for attempt in 1..=backoff.attempts {
            if inner.closed {
                return PushOutcome::Closed;
            }
            if inner.states.len() < self.capacity {
                self.insert(&mut inner, state);
                drop(inner);
                self.not_empty.notify_one();
                return PushOutcome::Pushed;
            }
            if attempt == backoff.attempts {
                break;
            }
            let _ = self.not_full.wait_for(&mut inner, delay);
            delay = delay.saturating_mul(2).min(backoff.max);
        }
        if inner.closed {
            return PushOutcome::Closed;
        }
        inner.dropped += 1;
        PushOutcome::Dropped {
            total: inner.dropped,
        }
    }

    /// Refuse further pushes and pops, discard queued states and wake every
    /// waiter. Idempotent.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.states.clear();
        drop(inner);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    fn insert(&self, inner: &mut Inner, state: SearchState) {
        match self.traversal {
            Traversal::BreadthFirst => inner.states.push_back(state),
            Traversal::DepthFirst => inner.states.push_front(state),
        }
        inner.pushed += 1;
        let size = inner.states.len() as u64;
        if size > inner.high_water {
            inner.high_water = size;
        }
    }

    fn finish_step(&self) {
        let mut inner = self.inner.lock();
        inner.active = inner.active.saturating_sub(1);
        let idle = inner.active == 0 && inner.states.is_empty();
        drop(inner);
        if idle {
            self.not_empty.notify_all();
        }
    }

    /// Current number of queued states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().states.len()
    }

    /// Whether no states are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().states.is_empty()
    }

    /// Whether the frontier has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Workers currently holding a popped state.
    #[must_use]
    pub fn active(&self) -> usize {
        self.inner.lock().active
    }

    /// Maximum capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// High-water mark of queued states.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.inner.lock().high_water
    }

    /// Total states ever inserted (seeds included).
    #[must_use]
    pub fn pushed(&self) -> u64 {
        self.inner.lock().pushed
    }

    /// Total states dropped because the frontier stayed full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.inner.lock().dropped
    }
}
