//! Search entry point and worker loop.

use std::panic::resume_unwind;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use crucible_graph::RecipeGraph;
use tracing::{debug, info, warn};

use crate::collector::{collect, Collected};
use crate::control::Control;
use crate::derivation::Derivation;
use crate::error::SearchError;
use crate::expand::{Expander, Expansion};
use crate::frontier::{Frontier, Pop, PushOutcome};
use crate::outcome::{SearchOutcome, SearchStats, TerminationReason};
use crate::policy::SearchPolicy;

/// Counters shared by every thread of one search.
#[derive(Debug, Default)]
struct Counters {
    nodes: AtomicU64,
    expansions: AtomicU64,
    dead_ends: AtomicU64,
    accepted: AtomicUsize,
    drop_reported: AtomicBool,
}

/// Borrowed state handed to each worker.
struct Worker<'a> {
    expander: &'a Expander<'a>,
    frontier: &'a Frontier,
    control: &'a Control<'a>,
    counters: &'a Counters,
    policy: &'a SearchPolicy,
    target: &'a str,
}

/// Find distinct complete derivations of `target`.
///
/// `target` is trimmed before lookup. Runtime conditions are never errors:
/// an unknown target yields [`TerminationReason::TargetNotFound`] with no
/// results, a base or recipe-less target yields the single derivation
/// `{target: []}`, and states dropped on a full frontier are counted in
/// [`SearchStats::states_dropped`].
///
/// All worker, collector and monitor threads are scoped to this call; when
/// it returns nothing from the search is still running.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if `policy` fails validation. No
/// thread is spawned in that case.
///
/// # Panics
///
/// Re-raises a panic from a worker or collector thread after the others
/// have been joined.
pub fn search(
    graph: &RecipeGraph,
    target: &str,
    policy: &SearchPolicy,
) -> Result<SearchOutcome, SearchError> {
    policy.validate()?;

    let target = target.trim();
    let Some(item) = graph.lookup(target) else {
        info!(element = target, "target not in graph");
        return Ok(SearchOutcome::not_found());
    };
    let started = Instant::now();

    if item.is_base() || item.recipes().is_empty() {
        info!(element = target, tier = item.tier(), "trivial target");
        return Ok(SearchOutcome {
            derivations: vec![Derivation::trivial(Arc::clone(item.name()))],
            elapsed: started.elapsed(),
            nodes_visited: 1,
            stats: SearchStats::default(),
            termination: TerminationReason::TrivialTarget,
        });
    }

    let counters = Counters {
        nodes: AtomicU64::new(1),
        ..Counters::default()
    };
    let expander = Expander::new(graph, item, policy.traversal, policy.tier_rule);
    let seeds = expander.initial_states(&counters.nodes);
    let seeded = seeds.len() as u64;
    if seeds.is_empty() {
        info!(element = target, "no admissible recipe for target");
        return Ok(SearchOutcome {
            derivations: Vec::new(),
            elapsed: started.elapsed(),
            nodes_visited: counters.nodes.load(Ordering::Relaxed),
            stats: SearchStats::default(),
            termination: TerminationReason::FrontierExhausted,
        });
    }

    let workers = policy.worker_count();
    info!(
        element = target,
        traversal = %policy.traversal,
        workers,
        quota = ?policy.quota,
        seeds = seeded,
        "search started"
    );

    let frontier = Frontier::new(policy.traversal, policy.frontier_capacity);
    frontier.seed(seeds);
    let control = Control::new(&frontier);
    let (results_tx, results_rx) = crossbeam_channel::unbounded::<Derivation>();

    let collected = thread::scope(|scope| {
        let collector =
            scope.spawn(|| collect(&results_rx, policy.quota, &control, &counters.accepted));

        let monitor = policy.progress_interval.map(|interval| {
            let (frontier, control, counters) = (&frontier, &control, &counters);
            scope.spawn(move || report_progress(interval, frontier, control, counters))
        });

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let worker = Worker {
                    expander: &expander,
                    frontier: &frontier,
                    control: &control,
                    counters: &counters,
                    policy,
                    target,
                };
                let results = results_tx.clone();
                scope.spawn(move || worker.run(&results))
            })
            .collect();
        drop(results_tx);

        let mut worker_panic = None;
        for handle in handles {
            if let Err(payload) = handle.join() {
                worker_panic.get_or_insert(payload);
            }
        }
        // Every sender is gone once the workers are joined; the collector
        // drains what is left and returns. Only then is exhaustion final: a
        // quota met by queued results has already been recorded.
        let collected = collector.join();
        control.cancel(TerminationReason::FrontierExhausted);
        if let Some(monitor) = monitor {
            let _ = monitor.join();
        }
        if let Some(payload) = worker_panic {
            resume_unwind(payload);
        }
        collected.unwrap_or_else(|payload| resume_unwind(payload))
    });
    control.finish();

    let Collected {
        derivations,
        duplicates,
        late,
    } = collected;
    let termination = control
        .reason()
        .unwrap_or(TerminationReason::FrontierExhausted);
    let outcome = SearchOutcome {
        derivations,
        elapsed: started.elapsed(),
        nodes_visited: counters.nodes.load(Ordering::Relaxed),
        stats: SearchStats {
            expansions: counters.expansions.load(Ordering::Relaxed),
            dead_ends: counters.dead_ends.load(Ordering::Relaxed),
            duplicates_suppressed: duplicates,
            late_discarded: late,
            states_dropped: frontier.dropped(),
            frontier_high_water: frontier.high_water(),
            seeded_states: seeded,
            workers: workers as u64,
        },
        termination,
    };
    info!(
        element = target,
        results = outcome.derivations.len(),
        nodes = outcome.nodes_visited,
        dropped = outcome.stats.states_dropped,
        termination = termination.as_str(),
        elapsed = ?outcome.elapsed,
        "search finished"
    );
    Ok(outcome)
}

impl Worker<'_> {
    fn run(self, results: &Sender<Derivation>) {
        loop {
            let (state, step) = match self.frontier.pop(self.policy.idle_wait) {
                Pop::Ready(state, step) => (state, step),
                Pop::Closed => return,
                Pop::Exhausted => {
                    self.control.exhaust();
                    return;
                }
            };
            self.counters.expansions.fetch_add(1, Ordering::Relaxed);

            let expansion = self
                .expander
                .expand(state, &self.counters.nodes, self.control);
            match expansion {
                Expansion::Complete(derivation) => {
                    // The collector outlives every worker, so this cannot fail.
                    let _ = results.send(derivation);
                }
                Expansion::DeadEnd => {
                    self.counters.dead_ends.fetch_add(1, Ordering::Relaxed);
                }
                Expansion::Children(children) => {
                    for child in children {
                        match self.frontier.push(child, &self.policy.backoff) {
                            PushOutcome::Pushed => {}
                            PushOutcome::Dropped { total } => self.report_drop(total),
                            PushOutcome::Closed => break,
                        }
                    }
                }
                Expansion::Interrupted => {}
            }
            drop(step);
        }
    }

    fn report_drop(&self, total: u64) {
        if self.counters.drop_reported.swap(true, Ordering::Relaxed) {
            debug!(element = self.target, total, "frontier full, state dropped");
        } else {
            warn!(
                element = self.target,
                capacity = self.frontier.capacity(),
                "frontier full, dropping states; results may be incomplete"
            );
        }
    }
}

fn report_progress(
    interval: Duration,
    frontier: &Frontier,
    control: &Control<'_>,
    counters: &Counters,
) {
    while !control.wait_stopped(interval) {
        debug!(
            nodes = counters.nodes.load(Ordering::Relaxed),
            frontier = frontier.len(),
            results = counters.accepted.load(Ordering::Relaxed),
            dropped = frontier.dropped(),
            "search progress"
        );
    }
}
