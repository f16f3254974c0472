use std::fmt;

use crate::candidate::Candidate;
use crate::policy::Policy;

/// Eligibility verdict for one candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Older than the age threshold.
    PurgeAge,
    /// Claimed by the per-store byte budget.
    PurgeSpace,
    /// Matches neither trigger.
    Keep,
}

impl Decision {
    /// Whether the candidate should be removed.
    #[must_use]
    pub const fn is_purge(self) -> bool {
        matches!(self, Self::PurgeAge | Self::PurgeSpace)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::PurgeAge => "purge (age)",
            Self::PurgeSpace => "purge (space)",
            Self::Keep => "keep",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running byte budget for a single store pass.
///
/// The budget advances when a candidate is *selected*, not when its removal
/// completes, so dry runs and live runs select identical sets. A zero target
/// never wants more.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StoreBudget {
    target_bytes: u64,
    selected_bytes: u64,
}

impl StoreBudget {
    /// Creates a budget aiming to free `target_bytes`.
    #[must_use]
    pub const fn new(target_bytes: u64) -> Self {
        Self {
            target_bytes,
            selected_bytes: 0,
        }
    }

    /// Effective per-store delete target.
    #[must_use]
    pub const fn target_bytes(&self) -> u64 {
        self.target_bytes
    }

    /// Bytes selected for purge so far.
    #[must_use]
    pub const fn selected_bytes(&self) -> u64 {
        self.selected_bytes
    }

    /// Whether the running total is still short of the target.
    #[must_use]
    pub const fn wants_more(&self) -> bool {
        self.selected_bytes < self.target_bytes
    }

    /// Records a selected candidate's footprint.
    pub const fn record_selection(&mut self, bytes: u64) {
        self.selected_bytes = self.selected_bytes.saturating_add(bytes);
    }
}

/// Decides one candidate against the policy and the store's budget.
///
/// The two triggers combine with a logical OR: the age trigger fires when a
/// nonzero threshold is strictly exceeded, and the byte-budget trigger fires
/// while the budget still wants more. The OR means a young file can be
/// purged purely to satisfy a free-space goal.
#[must_use]
pub fn decide(candidate: &Candidate, policy: &Policy, budget: &StoreBudget) -> Decision {
    let threshold = policy.age_threshold_days();
    if threshold > 0 && candidate.age_days() > i64::from(threshold) {
        return Decision::PurgeAge;
    }

    if budget.wants_more() {
        return Decision::PurgeSpace;
    }

    Decision::Keep
}
