use std::io::Write;

use disk::{free_megabytes, BYTES_PER_MEGABYTE};
use logging::Verbosity;
use store::TrashStore;
use time::PrimitiveDateTime;

use crate::collect::collect_candidates;
use crate::error::EngineError;
use crate::evaluate::{decide, StoreBudget};
use crate::policy::Policy;
use crate::purge::{purge, WritePermissionRecovery};
use crate::rank::rank_candidates;
use crate::report::Reporter;
use crate::stats::RunStats;

/// Prunes every store in order, folding per-store counters into one total.
///
/// # Errors
///
/// Stops at the first store whose processing fails fatally; counters from
/// stores already completed are lost with the error, matching the abort
/// semantics of the run as a whole.
pub fn run<Out: Write, Err: Write>(
    stores: &[TrashStore],
    policy: &Policy,
    now: PrimitiveDateTime,
    reporter: &mut Reporter<'_, Out, Err>,
) -> Result<RunStats, EngineError> {
    let mut stats = RunStats::new();
    for store in stores {
        stats.merge(run_store(store, policy, now, reporter)?);
    }
    Ok(stats)
}

/// Runs one store through the fixed pruning phases.
///
/// Validates the layout, probes free space when a space policy needs it,
/// applies the max-free skip guard, derives the per-store delete-target,
/// then collects, ranks, decides, and purges. The byte budget is scoped to
/// this store and advances on selection, so a dry run and the live run that
/// follows it select the same candidates.
///
/// # Errors
///
/// Returns [`EngineError`] for the fatal conditions: missing `info`
/// directory, unusable free-space reading, failed enumeration, or a sidecar
/// that vanished before purge.
pub fn run_store<Out: Write, Err: Write>(
    store: &TrashStore,
    policy: &Policy,
    now: PrimitiveDateTime,
    reporter: &mut Reporter<'_, Out, Err>,
) -> Result<RunStats, EngineError> {
    store.require_info_dir().map_err(EngineError::store)?;

    let mut stats = RunStats::new();

    let free_bytes = if policy.needs_free_space() {
        let megabytes = free_megabytes(store.root()).map_err(EngineError::free_space)?;
        Some(megabytes.saturating_mul(BYTES_PER_MEGABYTE))
    } else {
        None
    };

    if let Some(free) = free_bytes {
        let max_free = policy.max_free_bytes();
        if max_free > 0 && free > max_free {
            reporter.info(
                Verbosity::Verbose,
                format!(
                    "skipping '{}': enough free space already",
                    store.root().display(),
                ),
            );
            return Ok(stats);
        }
    }

    let target_bytes = effective_target(policy, free_bytes);
    let need_sizes = policy.stat() || target_bytes > 0;

    let mut candidates = collect_candidates(store, policy, need_sizes, now, reporter)?;
    for candidate in &candidates {
        stats.record_observed(candidate.consumed_bytes().unwrap_or(0));
    }

    rank_candidates(&mut candidates, policy.patterns());

    let mut budget = StoreBudget::new(target_bytes);
    let recovery = WritePermissionRecovery;
    for candidate in &candidates {
        let decision = decide(candidate, policy, &budget);

        let size_text = candidate.consumed_bytes().map_or_else(
            || String::from("size not measured"),
            |bytes| format!("{bytes} bytes"),
        );
        reporter.info(
            Verbosity::Verbose,
            format!(
                "candidate '{}': age {} days, {size_text}, {decision}",
                candidate.real_path().display(),
                candidate.age_days(),
            ),
        );

        if !decision.is_purge() {
            continue;
        }
        budget.record_selection(candidate.consumed_bytes().unwrap_or(0));
        if purge(candidate, policy.dry_run(), &recovery, reporter)? {
            stats.record_deleted(candidate.consumed_bytes().unwrap_or(0));
        }
    }

    Ok(stats)
}

/// Derives the store's delete-target from the free-space goal.
///
/// With a min-free goal and less free space than it asks for, the target is
/// the shortfall. Otherwise the explicit target applies unchanged; policy
/// validation keeps the two mutually exclusive.
fn effective_target(policy: &Policy, free_bytes: Option<u64>) -> u64 {
    if let Some(free) = free_bytes {
        let min_free = policy.min_free_bytes();
        if min_free > 0 && free < min_free {
            return min_free - free;
        }
    }
    policy.delete_target_bytes()
}
