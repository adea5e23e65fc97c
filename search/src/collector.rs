//! Single-owner result collection.
//!
//! Workers send complete derivations over a channel. The collector alone
//! owns the result list and the seen-fingerprint set, so the quota check and
//! the append are one step and no lock is needed around them.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::Receiver;
use crucible_graph::hash::ContentHash;
use tracing::debug;

use crate::control::Control;
use crate::derivation::{fingerprint, Derivation};
use crate::outcome::TerminationReason;

/// What the collector accepted and rejected.
#[derive(Debug, Default)]
pub struct Collected {
    pub derivations: Vec<Derivation>,
    pub duplicates: u64,
    pub late: u64,
}

/// Drain `results` until every sender is gone.
///
/// Duplicates (by fingerprint) are counted and ignored. Once `quota`
/// distinct derivations are held the search is cancelled with
/// [`TerminationReason::QuotaReached`]; distinct derivations arriving after
/// that are counted as late and ignored. `accepted` mirrors the result
/// count for progress reporting.
pub fn collect(
    results: &Receiver<Derivation>,
    quota: Option<NonZeroUsize>,
    control: &Control<'_>,
    accepted: &AtomicUsize,
) -> Collected {
    let mut seen: HashSet<ContentHash> = HashSet::new();
    let mut collected = Collected::default();

    for derivation in results {
        if !seen.insert(fingerprint(&derivation)) {
            collected.duplicates += 1;
            continue;
        }
        let full = quota.is_some_and(|q| collected.derivations.len() >= q.get());
        if full {
            collected.late += 1;
            continue;
        }
        collected.derivations.push(derivation);
        accepted.store(collected.derivations.len(), Ordering::Relaxed);

        if let Some(q) = quota {
            if collected.derivations.len() == q.get()
                && control.cancel(TerminationReason::QuotaReached { quota: q.get() })
            {
                debug!(quota = q.get(), "quota reached, draining workers");
            }
        }
    }
    collected
}
