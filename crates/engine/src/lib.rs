#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` is the selection-and-purge core of trash-sweep. Given a resolved
//! set of trash stores and an immutable [`Policy`], it enumerates sidecar
//! records, ranks the resulting candidates, decides eligibility under the
//! competing age and free-space policies, and removes what qualifies,
//! accumulating [`RunStats`] along the way.
//!
//! # Design
//!
//! One store is processed completely before the next begins. A store pass
//! runs through fixed phases: validate the `info` directory, probe free space
//! when a space policy needs it, derive the per-store delete-target, collect
//! candidates, rank them (deletion time ascending, then priority patterns),
//! and walk the ranked queue deciding and purging. The running byte budget is
//! scoped to a single pass and advances when a candidate is selected, so a
//! dry run predicts exactly what the following live run will remove.
//!
//! Purging is best-effort below the top level: a tree entry that cannot be
//! removed is logged and skipped, with a single chmod-and-retry recovery for
//! permission failures, injected through [`RemovalRecovery`] so it can be
//! simulated in tests.
//!
//! # Invariants
//!
//! - A sidecar without a parseable deletion date never enters the queue.
//! - Ranking is stable and idempotent for a fixed pattern list.
//! - An item is purged when the age trigger *or* the byte-budget trigger
//!   holds; a young file can therefore be purged to honour a free-space
//!   goal. That asymmetry is deliberate and pinned by tests.
//! - Dry-run never mutates the filesystem.
//!
//! # Errors
//!
//! [`EngineError`] carries the conditions that abort a run: a missing `info`
//! directory, an unusable free-space reading, a vanished sidecar at purge
//! time, and I/O failures enumerating a store. Everything else is reported
//! through the [`Reporter`] and the run continues.

mod candidate;
mod collect;
mod error;
mod evaluate;
mod policy;
mod purge;
mod rank;
mod report;
mod run;
mod stats;

pub use candidate::Candidate;
pub use error::{
    EngineError, EngineErrorKind, INTERNAL_EXIT_CODE, STORE_SELECT_EXIT_CODE,
    UNSUPPORTED_FS_EXIT_CODE,
};
pub use evaluate::{Decision, StoreBudget};
pub use policy::{Policy, PolicyBuilder, PolicyError};
pub use purge::{purge, RecoveryAction, RemovalRecovery, WritePermissionRecovery};
pub use rank::{rank_candidates, PriorityPattern};
pub use report::Reporter;
pub use run::{run, run_store};
pub use stats::RunStats;
